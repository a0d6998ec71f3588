//! Progress reporting for board discussions

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use raincloud_application::ProgressNotifier;
use raincloud_domain::BoardMember;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Reports progress during a discussion with a progress bar
pub struct ProgressReporter {
    multi: MultiProgress,
    bar: Mutex<Option<ProgressBar>>,
    total_batches: AtomicUsize,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bar: Mutex::new(None),
            total_batches: AtomicUsize::new(0),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_discussion_start(&self, total_members: usize, total_batches: usize) {
        self.total_batches.store(total_batches, Ordering::Relaxed);

        let pb = self.multi.add(ProgressBar::new(total_members as u64));
        pb.set_style(Self::bar_style());
        pb.set_prefix("Board");
        pb.set_message("Consulting...");

        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_batch_start(&self, index: usize, members: &[&BoardMember]) {
        let total = self.total_batches.load(Ordering::Relaxed);
        let names: Vec<&str> = members.iter().map(|m| m.role.as_str()).collect();
        self.with_bar(|pb| {
            pb.set_prefix(format!("Batch {}/{}", index + 1, total));
            pb.set_message(names.join(", "));
        });
    }

    fn on_member_complete(&self, member: &BoardMember, provider: Option<&str>, success: bool) {
        let status = match (success, provider) {
            (true, Some(provider)) => format!("{} {} via {}", "v".green(), member.role, provider),
            (true, None) => format!("{} {}", "v".green(), member.role),
            (false, _) => format!("{} {}", "x".red(), member.role),
        };
        self.with_bar(|pb| {
            pb.set_message(status);
            pb.inc(1);
        });
    }

    fn on_discussion_complete(&self, answered: usize, total: usize) {
        if let Ok(mut slot) = self.bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
        let summary = format!("{}/{} members answered", answered, total);
        let _ = self.multi.println(if answered == 0 {
            summary.red().to_string()
        } else {
            summary.green().to_string()
        });
    }
}

/// Plain line-per-event progress on stderr, for terminals that cannot
/// redraw a bar (pipes, CI logs).
pub struct SimpleProgress;

impl SimpleProgress {
    fn start_line(total_members: usize, total_batches: usize) -> String {
        format!(
            "{} {} ({} members, {} batches)",
            "->".cyan(),
            "Board discussion".bold(),
            total_members,
            total_batches
        )
    }

    fn member_line(member: &BoardMember, provider: Option<&str>, success: bool) -> String {
        match (success, provider) {
            (true, provider) => format!("  {} {} via {}", "v".green(), member, provider.unwrap_or("-")),
            (false, Some(provider)) => format!("  {} {} ({} failed)", "x".red(), member, provider),
            (false, None) => format!("  {} {} (no available provider)", "x".red(), member),
        }
    }

    fn summary_line(answered: usize, total: usize) -> String {
        format!("{} {}/{} members answered", "->".cyan(), answered, total)
    }
}

impl ProgressNotifier for SimpleProgress {
    fn on_discussion_start(&self, total_members: usize, total_batches: usize) {
        eprintln!("{}", Self::start_line(total_members, total_batches));
    }

    fn on_member_complete(&self, member: &BoardMember, provider: Option<&str>, success: bool) {
        eprintln!("{}", Self::member_line(member, provider, success));
    }

    fn on_discussion_complete(&self, answered: usize, total: usize) {
        eprintln!("{}", Self::summary_line(answered, total));
    }
}
