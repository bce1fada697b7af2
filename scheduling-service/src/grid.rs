use chrono::NaiveDate;
use clinic_directory::DoctorId;
use config_engine::GridConfig;
use serde::Serialize;

use crate::error::{SchedulingError, SchedulingResult};
use crate::schedule::{GridPlacement, Schedule};

/// Hour rows of the day calendar, `[start_hour, end_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotGrid {
    start_hour: u32,
    end_hour: u32,
    slot_height: u32,
}

impl SlotGrid {
    pub fn new(start_hour: u32, end_hour: u32, slot_height: u32) -> SchedulingResult<Self> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(SchedulingError::InvalidSchedule(format!(
                "grid hours {start_hour}..{end_hour}"
            )));
        }
        if slot_height == 0 {
            return Err(SchedulingError::InvalidSchedule(
                "grid slot height must be positive".to_string(),
            ));
        }
        Ok(Self {
            start_hour,
            end_hour,
            slot_height,
        })
    }

    pub fn from_config(config: &GridConfig) -> SchedulingResult<Self> {
        Self::new(config.start_hour, config.end_hour, config.slot_height)
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn slot_height(&self) -> u32 {
        self.slot_height
    }

    /// Row labels, `"09:00"` through the last hour before `end_hour`.
    pub fn labels(&self) -> Vec<String> {
        (self.start_hour..self.end_hour)
            .map(|hour| format!("{hour:02}:00"))
            .collect()
    }

    /// Total grid height in the same units as `slot_height`.
    pub fn height(&self) -> u32 {
        (self.end_hour - self.start_hour) * self.slot_height
    }

    pub fn project<'a>(
        &self,
        schedule: &'a Schedule,
        date: NaiveDate,
        doctor_id: &'a DoctorId,
    ) -> impl Iterator<Item = GridPlacement<'a>> + 'a {
        schedule.project_to_grid(
            date,
            doctor_id,
            self.start_hour,
            self.end_hour,
            self.slot_height,
        )
    }
}

impl Default for SlotGrid {
    fn default() -> Self {
        let config = GridConfig::default();
        Self {
            start_hour: config.start_hour,
            end_hour: config.end_hour,
            slot_height: config.slot_height,
        }
    }
}
