//! Dashboard service
//!
//! Loads the three dashboard resources in parallel. The snapshot is only
//! built when all three succeed, so a partial dashboard is never shown.

use crate::error::Result;
use crate::gateway::{DashboardSummary, DataGateway, NoteStatistics, RecentActivity};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub summary: DashboardSummary,
    pub statistics: NoteStatistics,
    pub activity: RecentActivity,
}

impl DashboardSnapshot {
    /// Share of notes in each status, as whole percentages
    pub fn status_percentages(&self) -> [(&'static str, i64); 3] {
        let stats = &self.statistics;
        let pct = |n: i64| if stats.total > 0 { n * 100 / stats.total } else { 0 };
        [
            ("Pendente", pct(stats.pending)),
            ("Em Andamento", pct(stats.in_progress)),
            ("Concluído", pct(stats.done)),
        ]
    }
}

pub async fn load_dashboard(gateway: &dyn DataGateway) -> Result<DashboardSnapshot> {
    tracing::debug!("Loading dashboard");

    let (summary, statistics, activity) = tokio::try_join!(
        gateway.dashboard_summary(),
        gateway.note_statistics(),
        gateway.recent_activity(),
    )?;

    tracing::debug!(
        "Dashboard loaded: {} stores, {} notes",
        summary.total_stores,
        statistics.total
    );

    Ok(DashboardSnapshot {
        summary,
        statistics,
        activity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::gateway::memory::MemoryGateway;

    fn seeded() -> MemoryGateway {
        let gateway = MemoryGateway::default();
        gateway.seed_dashboard(
            DashboardSummary {
                total_stores: 2,
                total_categories: 5,
                pending_notes: 3,
                active_reminders: 4,
                upcoming_reminders: 1,
            },
            NoteStatistics {
                pending: 3,
                in_progress: 1,
                done: 4,
                total: 8,
            },
        );
        gateway
    }

    #[tokio::test]
    async fn test_dashboard_loads_all_three() {
        let gateway = seeded();
        let snapshot = load_dashboard(&gateway).await.unwrap();

        assert_eq!(snapshot.summary.total_categories, 5);
        assert_eq!(snapshot.statistics.total, 8);
        assert_eq!(
            snapshot.status_percentages(),
            [("Pendente", 37), ("Em Andamento", 12), ("Concluído", 50)]
        );
    }

    #[tokio::test]
    async fn test_one_failure_fails_the_whole_dashboard() {
        let gateway = seeded();
        gateway.fail_on("note_statistics");

        let result = load_dashboard(&gateway).await;
        assert!(matches!(result, Err(AppError::Transport { status: 500 })));
    }

    #[test]
    fn test_percentages_without_notes() {
        let snapshot = DashboardSnapshot::default();
        assert!(snapshot.status_percentages().iter().all(|(_, p)| *p == 0));
    }
}
