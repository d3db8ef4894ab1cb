//! Console reporting observer
//!
//! One line per classification, a summary at the end. In dry-run mode
//! the plan events are all that fires, so the lines read as "would".

use timebridge_core::{SyncEvent, SyncObserver};
use timebridge_domain::Activity;

/// Prints classifications as they happen and keeps counts for the
/// summary line.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    dry_run: bool,
    equal: usize,
    updated: usize,
    created: usize,
    planned_updates: usize,
    planned_creates: usize,
}

impl ConsoleReporter {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run, ..Self::default() }
    }

    pub fn summary(&self) -> String {
        if self.dry_run {
            format!(
                "dry run: {} equal, {} to update, {} to create",
                self.equal, self.planned_updates, self.planned_creates
            )
        } else {
            format!(
                "done: {} equal, {} updated, {} created",
                self.equal, self.updated, self.created
            )
        }
    }
}

fn describe(activity: &Activity) -> String {
    if activity.description.is_empty() {
        format!("{} {}h", activity.date, activity.hours)
    } else {
        format!("{} {}h \"{}\"", activity.date, activity.hours, activity.description)
    }
}

impl SyncObserver for ConsoleReporter {
    fn on_event(&mut self, event: SyncEvent<'_>) {
        match event {
            SyncEvent::Equal { source, target } => {
                self.equal += 1;
                println!("= {} already present as #{}", describe(source), target.id);
            }
            SyncEvent::Update { source, target } => {
                self.planned_updates += 1;
                let verb = if self.dry_run { "would update" } else { "updating" };
                println!("~ {} #{} from {}", verb, target.id, describe(source));
            }
            SyncEvent::Updated { result, .. } => {
                self.updated += 1;
                println!("~ updated #{}", result.id);
            }
            SyncEvent::Create { source, .. } => {
                self.planned_creates += 1;
                let verb = if self.dry_run { "would create" } else { "creating" };
                println!("+ {} {}", verb, describe(source));
            }
            SyncEvent::Created { result, .. } => {
                self.created += 1;
                println!("+ created #{}", result.id);
            }
        }
    }
}
