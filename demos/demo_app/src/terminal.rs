//! Terminal raw mode, so bytes reach the parser as they are typed.
//!
//! Canonical line editing and echo are turned off, and Enter is delivered as
//! a bare `\r` the way a serial terminal sends it.
//!
//! - On **Unix**, the `termios` crate adjusts the terminal attributes.
//! - On **Windows**, the `winapi` crate adjusts the console mode.
//!
//! The original settings are restored when the [`RawMode`] guard is dropped.

use std::io;

/// Handle to the terminal's raw mode state.
pub struct RawMode {
    #[cfg(unix)]
    fd: i32,
    #[cfg(unix)]
    /// Original terminal settings (Unix).
    original: termios::Termios,
    #[cfg(windows)]
    /// Original console mode (Windows).
    original_mode: u32,
}

impl RawMode {
    /// Enables raw mode on `fd` (0 for stdin).
    #[cfg(unix)]
    pub fn new(fd: i32) -> io::Result<Self> {
        use termios::*;
        let original = Termios::from_fd(fd)?;
        let mut raw = original;
        raw.c_lflag &= !(ICANON | ECHO);
        // Keep CR as CR instead of turning it into NL.
        raw.c_iflag &= !ICRNL;
        tcsetattr(fd, TCSANOW, &raw)?;
        Ok(RawMode { fd, original })
    }

    #[cfg(windows)]
    pub fn new(_: i32) -> io::Result<Self> {
        use winapi::um::{
            consoleapi::{GetConsoleMode, SetConsoleMode},
            handleapi::INVALID_HANDLE_VALUE,
            processenv::GetStdHandle,
            winbase::STD_INPUT_HANDLE,
            wincon::{ENABLE_ECHO_INPUT, ENABLE_LINE_INPUT},
        };
        unsafe {
            let handle = GetStdHandle(STD_INPUT_HANDLE);
            if handle == INVALID_HANDLE_VALUE {
                return Err(io::Error::last_os_error());
            }
            let mut mode = 0;
            if GetConsoleMode(handle, &mut mode) == 0 {
                return Err(io::Error::last_os_error());
            }
            let original_mode = mode;
            // Disable line input and echo
            mode &= !(ENABLE_LINE_INPUT | ENABLE_ECHO_INPUT);
            if SetConsoleMode(handle, mode) == 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(RawMode { original_mode })
        }
    }
}

impl Drop for RawMode {
    /// Restores the original terminal/console mode.
    #[cfg(unix)]
    fn drop(&mut self) {
        use termios::*;
        let _ = tcsetattr(self.fd, TCSANOW, &self.original);
    }

    #[cfg(windows)]
    fn drop(&mut self) {
        use winapi::um::consoleapi::SetConsoleMode;
        use winapi::um::handleapi::INVALID_HANDLE_VALUE;
        use winapi::um::processenv::GetStdHandle;
        use winapi::um::winbase::STD_INPUT_HANDLE;
        unsafe {
            let handle = GetStdHandle(STD_INPUT_HANDLE);
            if handle != INVALID_HANDLE_VALUE {
                SetConsoleMode(handle, self.original_mode);
            }
        }
    }
}
