use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};

/// Monitoring progress bar
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub(crate) enum Bar {
    /// Fancy Unicode progress bars
    #[default]
    Unicode,
    /// Basic ASCII progress bars
    Ascii,
}

impl Bar {
    /// Builds a progress bar counting `len` observations.
    pub(crate) fn progress_bar(&self, len: u64, trace_name: &str) -> ProgressBar {
        const FINE_BAR: &str = "█▉▊▋▌▍▎▏  ";
        const ASCII_BAR: &str = "#--";

        let style = if let Bar::Ascii = self {
            ProgressStyle::with_template("{msg}\n{bar:50} {percent:>3}% ({pos}/{len}) ETA: {eta}")
                .expect("progress bar template")
                .progress_chars(ASCII_BAR)
        } else {
            ProgressStyle::with_template(
                "{msg}\n{bar:50.white.on_black} {percent:>3}% ({pos}/{len}) ETA: {eta}",
            )
            .expect("progress bar template")
            .progress_chars(FINE_BAR)
        };
        ProgressBar::new(len)
            .with_style(style)
            .with_message(format!("Monitoring {trace_name}"))
    }
}
