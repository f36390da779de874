use crossterm::terminal;

/// Helper managing proper setup and teardown of the terminal's raw mode
///
/// Raw mode is left again when the guard is dropped, also on early returns and panics.
#[derive(Default)]
pub(crate) struct RawModeGuard {
    enabled: bool,
    active: bool,
}

impl RawModeGuard {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            active: false,
        }
    }

    pub fn enter(&mut self) -> std::io::Result<()> {
        if self.enabled && !self.active {
            terminal::enable_raw_mode()?;
            log::debug!("raw mode enabled");
            self.active = true;
        }
        Ok(())
    }

    pub fn exit(&mut self) {
        if self.active {
            let _ = terminal::disable_raw_mode();
            log::debug!("raw mode disabled");
            self.active = false;
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.exit();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn disabled_guard_never_touches_the_terminal() {
        let mut guard = RawModeGuard::new(false);
        guard.enter().unwrap();

        assert!(!guard.active);
        guard.exit();
        assert!(!guard.active);
    }
}
