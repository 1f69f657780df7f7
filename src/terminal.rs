use std::fmt;

use crossterm::Command;

/// Pointer shapes understood by terminals implementing OSC 22.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PointerShape {
    Default,
    ColumnResize,
}

impl PointerShape {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::ColumnResize => "ew-resize",
        }
    }
}

/// OSC 22 pointer shape request. Terminals without support ignore it.
#[derive(Debug, Clone, Copy)]
pub struct SetPointerShape(pub PointerShape);

impl Command for SetPointerShape {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b]22;{}\x1b\\", self.0.as_str())
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Press/release reporting in SGR encoding, without motion events.
#[derive(Debug, Clone, Copy)]
pub struct PressReleaseReporting(pub bool);

impl Command for PressReleaseReporting {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        if self.0 {
            f.write_str("\x1b[?1000h\x1b[?1006h")
        } else {
            f.write_str("\x1b[?1006l\x1b[?1000l")
        }
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Motion reporting while a button is held.
#[derive(Debug, Clone, Copy)]
pub struct ButtonMotionReporting(pub bool);

impl Command for ButtonMotionReporting {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        if self.0 {
            f.write_str("\x1b[?1002h")
        } else {
            f.write_str("\x1b[?1002l")
        }
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> std::io::Result<()> {
        Ok(())
    }
}
