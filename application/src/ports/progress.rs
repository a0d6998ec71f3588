//! Progress notification port
//!
//! Defines the interface for reporting progress during a board discussion.

use raincloud_domain::BoardMember;

/// Callback for progress updates during dispatch
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.). Member callbacks may
/// arrive in any order within a batch.
pub trait ProgressNotifier: Send + Sync {
    /// Called once, before the first batch starts
    fn on_discussion_start(&self, total_members: usize, total_batches: usize);

    /// Called when a batch starts
    fn on_batch_start(&self, _index: usize, _members: &[&BoardMember]) {}

    /// Called when a member settles; `provider` is the binding that was
    /// called, if one was resolved
    fn on_member_complete(&self, member: &BoardMember, provider: Option<&str>, success: bool);

    /// Called when every member of a batch has settled
    fn on_batch_complete(&self, _index: usize) {}

    /// Called once, after the last batch settled
    fn on_discussion_complete(&self, _answered: usize, _total: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_discussion_start(&self, _total_members: usize, _total_batches: usize) {}
    fn on_member_complete(&self, _member: &BoardMember, _provider: Option<&str>, _success: bool) {}
}
