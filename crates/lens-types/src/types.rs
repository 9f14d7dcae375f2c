use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::language::OcrLanguage;

/// Screen rectangle in absolute (virtual desktop) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CaptureRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CaptureRegion {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-area regions are accepted but never processed
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && y >= self.y
            && i64::from(x) < i64::from(self.x) + i64::from(self.width)
            && i64::from(y) < i64::from(self.y) + i64::from(self.height)
    }

    pub fn moved_to(&self, x: i32, y: i32) -> Self {
        Self { x, y, ..*self }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid region '{0}', expected X,Y,WIDTH,HEIGHT")]
pub struct RegionParseError(pub String);

/// Accepts `x,y,w,h` or `x y w h`
impl FromStr for CaptureRegion {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || RegionParseError(s.to_string());
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();
        let [x, y, width, height] = parts.as_slice() else {
            return Err(err());
        };
        Ok(Self {
            x: x.parse().map_err(|_| err())?,
            y: y.parse().map_err(|_| err())?,
            width: width.parse().map_err(|_| err())?,
            height: height.parse().map_err(|_| err())?,
        })
    }
}

/// User-facing controls, queued onto the interactive loop
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    SelectRegion(CaptureRegion),
    ClearRegion,
    PointerDown { x: i32, y: i32 },
    PointerMove { x: i32, y: i32 },
    PointerUp,
    SetSource(OcrLanguage),
    SetDest(OcrLanguage),
    SetAutoTranslate(bool),
    TranslateNow,
    ShowOriginal(bool),
    StartMonitoring,
    StopMonitoring,
    CopyTranslation,
    Quit,
}

/// What the floating display should show after a change
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayUpdate {
    pub translation: Option<String>,
    pub original: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Command(UiCommand),
    Display(DisplayUpdate),
    Status { message: String, monitoring: bool },
    CopyText(String),
    Shutdown,
}
