//! Daily durood tally

use serde::Serialize;

pub const DEFAULT_DAILY_GOAL: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DuroodCounter {
    count: u32,
    goal: u32,
}

impl Default for DuroodCounter {
    fn default() -> Self {
        Self::with_goal(DEFAULT_DAILY_GOAL)
    }
}

impl DuroodCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A zero goal is raised to 1
    pub fn with_goal(goal: u32) -> Self {
        Self {
            count: 0,
            goal: goal.max(1),
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    pub fn add(&mut self, n: u32) -> u32 {
        self.count = self.count.saturating_add(n);
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Percentage of the goal, capped at 100
    pub fn progress(&self) -> f64 {
        (f64::from(self.count) / f64::from(self.goal) * 100.0).min(100.0)
    }

    pub fn goal_reached(&self) -> bool {
        self.count >= self.goal
    }

    pub fn view(&self) -> DuroodView {
        DuroodView {
            count: self.count,
            goal: self.goal,
            progress: self.progress(),
            goal_reached: self.goal_reached(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct DuroodView {
    pub count: u32,
    pub goal: u32,
    pub progress: f64,
    pub goal_reached: bool,
}
