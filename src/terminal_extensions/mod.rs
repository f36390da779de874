pub(crate) mod raw_mode;

pub(crate) use raw_mode::RawModeGuard;
