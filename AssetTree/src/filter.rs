//! Node filter criteria
//!
//! The criteria a consumer exposes to the user: a free-text name query plus
//! optional status and sensor type. All present criteria must hold.

use crate::attributes::{AssetStatus, Attributes, SensorType};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeFilter {
    /// Case-insensitive substring of the node name.
    pub name: Option<String>,
    pub status: Option<AssetStatus>,
    pub sensor_type: Option<SensorType>,
}

impl NodeFilter {
    /// Sets the name query. Blank queries are ignored.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.trim().is_empty() { None } else { Some(name) };
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: AssetStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_sensor_type(mut self, sensor_type: SensorType) -> Self {
        self.sensor_type = Some(sensor_type);
        self
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.status.is_none() && self.sensor_type.is_none()
    }

    /// Whether a raw attribute bag satisfies every present criterion.
    pub fn matches(&self, attributes: &Attributes) -> bool {
        if let Some(query) = &self.name
            && !attributes
                .display_name()
                .to_lowercase()
                .contains(&query.trim().to_lowercase())
        {
            return false;
        }
        if self.status.is_some() && attributes.status != self.status {
            return false;
        }
        if self.sensor_type.is_some() && attributes.sensor_type != self.sensor_type {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = NodeFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&Attributes::default()));
        assert!(NodeFilter::default().with_name("   ").is_empty());
    }

    #[test]
    fn test_name_is_case_insensitive_substring() {
        let filter = NodeFilter::default().with_name("MOTOR");
        assert!(filter.matches(&Attributes::named("Electric motor 3")));
        assert!(!filter.matches(&Attributes::named("Fan")));
        assert!(!filter.matches(&Attributes::default()));
    }

    #[test]
    fn test_all_criteria_must_hold() {
        let filter = NodeFilter::default()
            .with_name("sensor")
            .with_status(AssetStatus::Alert)
            .with_sensor_type(SensorType::Energy);

        let hit = Attributes::named("Energy sensor")
            .with_status(AssetStatus::Alert)
            .with_sensor_type(SensorType::Energy);
        let wrong_status = hit.clone().with_status(AssetStatus::Operating);
        let no_sensor = Attributes::named("Energy sensor").with_status(AssetStatus::Alert);

        assert!(filter.matches(&hit));
        assert!(!filter.matches(&wrong_status));
        assert!(!filter.matches(&no_sensor));
    }
}
