//! Command surface.
//!
//! One [`Command`] per user action. Scripts hold one command per line:
//!
//! ```text
//! # comments and blank lines are skipped
//! select-projection cylinder
//! toggle-draw-mode
//! stroke 120 64 #ff0000
//! clear-canvas
//! upload-texture textures/scales.png
//! reset
//! ```

use crate::errors::{MantleError, Result};
use crate::projection::ProjectionKind;
use crate::studio::canvas::BrushColor;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SelectProjection(ProjectionKind),
    ToggleDrawMode,
    /// Canvas pixel coordinates. `None` uses the canvas brush color.
    Stroke {
        x: f32,
        y: f32,
        color: Option<BrushColor>,
    },
    ClearCanvas,
    /// Encoded image bytes.
    UploadTexture(Vec<u8>),
    /// Image file, read through the asset server when executed.
    UploadTextureFile(String),
    Reset,
}

impl Command {
    /// Script keyword of this command.
    pub fn name(&self) -> &'static str {
        match self {
            Command::SelectProjection(_) => "select-projection",
            Command::ToggleDrawMode => "toggle-draw-mode",
            Command::Stroke { .. } => "stroke",
            Command::ClearCanvas => "clear-canvas",
            Command::UploadTexture(_) | Command::UploadTextureFile(_) => "upload-texture",
            Command::Reset => "reset",
        }
    }

    /// Parses one script line. Blank lines and `#` comments yield `None`.
    ///
    /// `upload-texture` only records its path; the file is read when the
    /// command runs.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let keyword = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        let command = match (keyword, args.as_slice()) {
            ("select-projection", [kind]) => Command::SelectProjection(kind.parse()?),
            ("toggle-draw-mode", []) => Command::ToggleDrawMode,
            ("stroke", [x, y, rest @ ..]) if rest.len() <= 1 => Command::Stroke {
                x: parse_coordinate(x)?,
                y: parse_coordinate(y)?,
                color: rest.first().map(|c| c.parse()).transpose()?,
            },
            ("clear-canvas", []) => Command::ClearCanvas,
            ("upload-texture", [path]) => Command::UploadTextureFile((*path).to_string()),
            ("reset", []) => Command::Reset,
            (
                "select-projection" | "toggle-draw-mode" | "stroke" | "clear-canvas" | "upload-texture" | "reset",
                _,
            ) => {
                return Err(MantleError::InvalidCommand(format!("wrong arguments: '{line}'")));
            }
            _ => return Err(MantleError::InvalidCommand(format!("unknown command '{keyword}'"))),
        };
        Ok(Some(command))
    }

    /// Parses a whole script, stopping at the first bad line.
    pub fn parse_script(script: &str) -> Result<Vec<Command>> {
        let mut commands = Vec::new();
        for (number, line) in script.lines().enumerate() {
            let parsed = Self::parse(line).map_err(|e| match e {
                MantleError::InvalidCommand(msg) => {
                    MantleError::InvalidCommand(format!("line {}: {msg}", number + 1))
                }
                other => other,
            })?;
            commands.extend(parsed);
        }
        Ok(commands)
    }
}

fn parse_coordinate(text: &str) -> Result<f32> {
    text.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| MantleError::InvalidCommand(format!("bad coordinate '{text}'")))
}
