/// Options controlling one engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Report what would run without invoking any feature logic.
    pub dry_run: bool,
    /// Keep going after a feature fails.
    pub continue_on_error: bool,
    /// Treat `depends_on` as a hard precondition. Off by default: dependencies
    /// are advisory and only discovery order is enforced.
    pub enforce_dependencies: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { dry_run: false, continue_on_error: true, enforce_dependencies: false }
    }
}
