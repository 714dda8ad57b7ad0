// Canvas script replay
//
// One command per line, `#` starts a comment:
//
//   add <headline|text|product> [as NAME]
//   drag <REF> <DX> <DY>          press move handle, move by delta, release
//   resize <REF> <DW> <DH>        press resize handle, move by delta, release
//   press <move|resize> <REF> <X> <Y>
//   move <X> <Y>
//   release
//   lock | unlock | toggle
//   delete <REF>
//   edit <REF> <content|name|pros|cons|link> <TEXT...>
//
// REF is a name bound with `as`, or `#N` for the N-th block (1-based) in
// current list order. In edit text, `\n` is a newline.

use std::collections::HashMap;

use pressroom_canvas::{Affordance, BlockId, BlockKind, EditorSession, FieldEdit, Point, PointerEvent};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add { kind: BlockKind, name: Option<String> },
    Drag { target: String, dx: f32, dy: f32 },
    Resize { target: String, dw: f32, dh: f32 },
    Press { resize: bool, target: String, at: Point },
    Move { at: Point },
    Release,
    Lock,
    Unlock,
    Toggle,
    Delete { target: String },
    Edit { target: String, edit: FieldEdit },
}

/// A script problem, reported with its 1-based line number.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

fn err(line: usize, message: impl Into<String>) -> ScriptError {
    ScriptError { line, message: message.into() }
}

fn number(line: usize, s: Option<&str>, what: &str) -> Result<f32, ScriptError> {
    let s = s.ok_or_else(|| err(line, format!("missing {}", what)))?;
    s.parse::<f32>()
        .map_err(|_| err(line, format!("{} must be a number, got {:?}", what, s)))
}

fn target(line: usize, s: Option<&str>) -> Result<String, ScriptError> {
    s.map(str::to_string).ok_or_else(|| err(line, "missing block reference"))
}

/// Parse a whole script. Blank lines and comments are skipped.
pub fn parse(source: &str) -> Result<Vec<(usize, Command)>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        commands.push((line_no, parse_line(line_no, line)?));
    }
    Ok(commands)
}

fn parse_line(n: usize, line: &str) -> Result<Command, ScriptError> {
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim_start();
    let mut args = rest.split_whitespace();

    let command = match verb {
        "add" => {
            let kind_str = args.next().ok_or_else(|| err(n, "missing block type"))?;
            let kind = BlockKind::parse(kind_str)
                .ok_or_else(|| err(n, format!("unknown block type {:?}", kind_str)))?;
            let name = match (args.next(), args.next()) {
                (None, _) => None,
                (Some("as"), Some(name)) => Some(name.to_string()),
                _ => return Err(err(n, "expected `as NAME`")),
            };
            Command::Add { kind, name }
        }
        "drag" => Command::Drag {
            target: target(n, args.next())?,
            dx: number(n, args.next(), "dx")?,
            dy: number(n, args.next(), "dy")?,
        },
        "resize" => Command::Resize {
            target: target(n, args.next())?,
            dw: number(n, args.next(), "dw")?,
            dh: number(n, args.next(), "dh")?,
        },
        "press" => {
            let resize = match args.next() {
                Some("move") => false,
                Some("resize") => true,
                other => return Err(err(n, format!("expected move or resize handle, got {:?}", other))),
            };
            Command::Press {
                resize,
                target: target(n, args.next())?,
                at: Point::new(number(n, args.next(), "x")?, number(n, args.next(), "y")?),
            }
        }
        "move" => Command::Move {
            at: Point::new(number(n, args.next(), "x")?, number(n, args.next(), "y")?),
        },
        "release" => Command::Release,
        "lock" => Command::Lock,
        "unlock" => Command::Unlock,
        "toggle" => Command::Toggle,
        "delete" => Command::Delete { target: target(n, args.next())? },
        "edit" => {
            let (target, rest) = rest.split_once(char::is_whitespace).ok_or_else(|| err(n, "missing field"))?;
            let rest = rest.trim_start();
            let (field, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let text = text.trim_start().replace("\\n", "\n");
            let edit = match field {
                "content" => FieldEdit::Content(text),
                "name" => FieldEdit::ProductName(text),
                "pros" => FieldEdit::Pros(text),
                "cons" => FieldEdit::Cons(text),
                "link" => FieldEdit::Link(text),
                "" => return Err(err(n, "missing field")),
                other => return Err(err(n, format!("unknown field {:?}", other))),
            };
            Command::Edit { target: target.to_string(), edit }
        }
        other => return Err(err(n, format!("unknown command {:?}", other))),
    };

    if verb != "edit" && args.next().is_some() {
        return Err(err(n, format!("too many arguments for {}", verb)));
    }
    Ok(command)
}

/// Replays commands against an editor session.
pub struct Replay {
    session: EditorSession,
    names: HashMap<String, BlockId>,
}

impl Default for Replay {
    fn default() -> Self {
        Self::new(EditorSession::new())
    }
}

impl Replay {
    pub fn new(session: EditorSession) -> Self {
        Self { session, names: HashMap::new() }
    }

    pub fn into_session(self) -> EditorSession {
        self.session
    }

    fn resolve(&self, line: usize, reference: &str) -> Result<BlockId, ScriptError> {
        if let Some(index) = reference.strip_prefix('#') {
            let n: usize = index
                .parse()
                .map_err(|_| err(line, format!("bad block index {:?}", reference)))?;
            return n
                .checked_sub(1)
                .and_then(|i| self.session.blocks().get(i))
                .map(|b| b.id)
                .ok_or_else(|| err(line, format!("no block {}", reference)));
        }
        self.names
            .get(reference)
            .copied()
            .ok_or_else(|| err(line, format!("unknown block name {:?}", reference)))
    }

    pub fn run(&mut self, commands: &[(usize, Command)]) -> Result<(), ScriptError> {
        for (line, command) in commands {
            self.apply(*line, command)?;
        }
        Ok(())
    }

    pub fn apply(&mut self, line: usize, command: &Command) -> Result<(), ScriptError> {
        match command {
            Command::Add { kind, name } => {
                let id = self.session.add_block(*kind).id;
                if let Some(name) = name {
                    self.names.insert(name.clone(), id);
                }
            }
            Command::Drag { target, dx, dy } => {
                let id = self.resolve(line, target)?;
                self.gesture(line, Affordance::MoveHandle(id), *dx, *dy);
            }
            Command::Resize { target, dw, dh } => {
                let id = self.resolve(line, target)?;
                self.gesture(line, Affordance::ResizeHandle(id), *dw, *dh);
            }
            Command::Press { resize, target, at } => {
                let id = self.resolve(line, target)?;
                let target = if *resize { Affordance::ResizeHandle(id) } else { Affordance::MoveHandle(id) };
                if !self.session.handle(PointerEvent::Press { target, at: *at }) {
                    log::info!("line {}: press ignored", line);
                }
            }
            Command::Move { at } => {
                self.session.handle(PointerEvent::Move { at: *at });
            }
            Command::Release => {
                self.session.handle(PointerEvent::Release);
            }
            Command::Lock => self.session.set_locked(true),
            Command::Unlock => self.session.set_locked(false),
            Command::Toggle => {
                self.session.toggle_lock();
            }
            Command::Delete { target } => {
                let id = self.resolve(line, target)?;
                self.session.delete_block(id);
            }
            Command::Edit { target, edit } => {
                let id = self.resolve(line, target)?;
                self.session.apply_edit(id, edit.clone());
            }
        }
        Ok(())
    }

    // Press at the origin, move by the delta, release.
    fn gesture(&mut self, line: usize, target: Affordance, dx: f32, dy: f32) {
        let start = Point::new(0.0, 0.0);
        if !self.session.handle(PointerEvent::Press { target, at: start }) {
            log::info!("line {}: gesture ignored", line);
            return;
        }
        self.session.handle(PointerEvent::Move { at: Point::new(dx, dy) });
        self.session.handle(PointerEvent::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pressroom_canvas::Position;

    fn replay(source: &str) -> EditorSession {
        let commands = parse(source).unwrap();
        let mut replay = Replay::default();
        replay.run(&commands).unwrap();
        replay.into_session()
    }

    #[test]
    fn test_drag_and_resize() {
        let r = replay("add text as story\ndrag story 30 -20\n");
        assert_eq!(r.blocks()[0].position, Position::new(80.0, 130.0, 450.0, 400.0));

        let r = replay("add text as story\nresize story -500 -500\n");
        assert_eq!(r.blocks()[0].position, Position::new(50.0, 150.0, 100.0, 50.0));
    }

    #[test]
    fn test_index_references_and_comments() {
        let r = replay("# layout\nadd headline\n\nadd product\ndelete #1\n");
        assert_eq!(r.blocks().len(), 1);
        assert_eq!(r.blocks()[0].kind(), BlockKind::Product);
    }

    #[test]
    fn test_edit_splits_pros() {
        let r = replay("add product as card\nedit card pros Fast\\nCheap\\n\nedit card name Sony A7IV\n");
        let product = r.blocks()[0].product().unwrap();
        assert_eq!(product.pros, vec!["Fast", "Cheap", ""]);
        assert_eq!(product.name, "Sony A7IV");
    }

    #[test]
    fn test_lock_mid_drag_freezes_position() {
        let r = replay("add text as t\npress move t 0 0\nmove 10 10\nlock\nmove 99 99\nrelease\n");
        assert_eq!(r.blocks()[0].position, Position::new(60.0, 160.0, 450.0, 400.0));
        assert!(r.is_locked());
    }

    #[test]
    fn test_locked_gestures_and_edits_ignored() {
        let r = replay("add headline as h\nlock\ndrag h 100 100\nedit h content Changed\nunlock\n");
        let block = &r.blocks()[0];
        assert_eq!(block.position, BlockKind::Headline.default_position());
        assert_eq!(block.text(), Some("New Headline"));
    }

    #[test]
    fn test_parse_errors_carry_line() {
        assert_eq!(parse("add text\nfly away").unwrap_err().line, 2);
        assert!(parse("add widget").unwrap_err().message.contains("unknown block type"));
        assert!(parse("drag t ten 5").unwrap_err().message.contains("dx must be a number"));
        assert!(parse("lock now").unwrap_err().message.contains("too many arguments"));
        assert!(parse("edit t colour red").unwrap_err().message.contains("unknown field"));
    }

    #[test]
    fn test_unknown_reference_is_error() {
        let commands = parse("drag ghost 1 1").unwrap();
        let err = Replay::default().run(&commands).unwrap_err();
        assert_eq!(err.to_string(), "line 1: unknown block name \"ghost\"");
    }
}
