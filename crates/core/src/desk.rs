//! Editorial desk: the application shell state.
//!
//! Three sections: the generator form, the press room (editing), and the
//! final edition (read-only preview). The desk owns the current article,
//! its citations, and the block canvas. All state is per process.
//!
//! The in-flight flag is the only guard against overlapping generation
//! requests: [`Desk::begin_submit`] hands out at most one ticket until
//! [`Desk::finish_submit`] is called.

use pressroom_canvas::EditorSession;

use crate::article::{ComparisonData, GroundingSource};
use crate::generate::{GenerateError, Generated, Generator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// "I. The Generator"
    #[default]
    Generator,
    /// "II. The Press Room"
    PressRoom,
    /// "III. Final Edition"
    Published,
}

/// Inputs captured when a generation request is started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub product_a: String,
    pub product_b: String,
}

#[derive(Debug, Clone)]
pub struct Desk {
    tab: Tab,
    product_a: String,
    product_b: String,
    in_flight: bool,
    error: Option<String>,
    data: ComparisonData,
    sources: Vec<GroundingSource>,
    canvas: EditorSession,
    lock_on_preview: bool,
    // Lock state to restore when leaving the preview
    lock_before_preview: Option<bool>,
}

impl Default for Desk {
    fn default() -> Self {
        Self::new(ComparisonData::draft())
    }
}

impl Desk {
    pub fn new(data: ComparisonData) -> Self {
        Self {
            tab: Tab::Generator,
            product_a: String::new(),
            product_b: String::new(),
            in_flight: false,
            error: None,
            data,
            sources: Vec::new(),
            canvas: EditorSession::new(),
            lock_on_preview: true,
            lock_before_preview: None,
        }
    }

    /// Lock the canvas while the final edition is shown.
    pub fn with_lock_on_preview(mut self, lock: bool) -> Self {
        self.lock_on_preview = lock;
        self
    }

    // --- Navigation ---

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Skip generation and write the article by hand.
    pub fn compose_manually(&mut self) {
        self.leave_preview();
        self.tab = Tab::PressRoom;
    }

    pub fn commit_to_print(&mut self) {
        if self.tab == Tab::Published {
            return;
        }
        if self.lock_on_preview {
            self.lock_before_preview = Some(self.canvas.is_locked());
            self.canvas.set_locked(true);
        }
        self.tab = Tab::Published;
    }

    /// Back from the final edition to the press room.
    pub fn back_to_desk(&mut self) {
        self.leave_preview();
        self.tab = Tab::PressRoom;
    }

    fn leave_preview(&mut self) {
        if let Some(locked) = self.lock_before_preview.take() {
            self.canvas.set_locked(locked);
        }
    }

    // --- Generator form ---

    pub fn product_a(&self) -> &str {
        &self.product_a
    }

    pub fn product_b(&self) -> &str {
        &self.product_b
    }

    pub fn set_product_a(&mut self, name: impl Into<String>) {
        self.product_a = name.into();
    }

    pub fn set_product_b(&mut self, name: impl Into<String>) {
        self.product_b = name.into();
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Submission control is usable: not in flight, both names present.
    /// Names made only of whitespace count as missing.
    pub fn can_submit(&self) -> bool {
        !self.in_flight && !self.product_a.trim().is_empty() && !self.product_b.trim().is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a generation request. `None` when a request is already in
    /// flight or a product name is missing.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if !self.can_submit() {
            return None;
        }
        self.in_flight = true;
        self.error = None;
        log::info!("generating comparison: {} vs {}", self.product_a, self.product_b);
        Some(SubmitTicket {
            product_a: self.product_a.clone(),
            product_b: self.product_b.clone(),
        })
    }

    /// Complete the in-flight request. Success replaces the article and
    /// citations and opens the press room; failure keeps everything and
    /// records the message.
    pub fn finish_submit(&mut self, result: Result<Generated, GenerateError>) {
        if !self.in_flight {
            log::warn!("generation result arrived with no request in flight, dropped");
            return;
        }
        self.in_flight = false;
        match result {
            Ok(generated) => {
                log::info!("generation finished with {} sources", generated.sources.len());
                self.data = generated.data;
                self.sources = generated.sources;
                self.compose_manually();
            }
            Err(e) => {
                log::warn!("generation failed: {}", e);
                self.error = Some(e.user_message());
            }
        }
    }

    /// Run a full request through `generator`. Returns false when nothing
    /// was submitted.
    pub fn submit(&mut self, generator: &dyn Generator) -> bool {
        let Some(ticket) = self.begin_submit() else {
            return false;
        };
        let result = generator.generate(&ticket.product_a, &ticket.product_b);
        self.finish_submit(result);
        true
    }

    // --- Article ---

    pub fn data(&self) -> &ComparisonData {
        &self.data
    }

    /// Press room edits of the current article.
    pub fn article_mut(&mut self) -> &mut ComparisonData {
        &mut self.data
    }

    pub fn sources(&self) -> &[GroundingSource] {
        &self.sources
    }

    pub fn canvas(&self) -> &EditorSession {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut EditorSession {
        &mut self.canvas
    }
}
