use serde::{Deserialize, Serialize};

/// Timetable of one line for one day category.
///
/// The i-th entry of `departures_in` belongs to the same row as the i-th entry of
/// `departures_out`. Times are kept exactly as published.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScheduleRecord {
    #[serde(rename = "name")]
    pub route_name: String,
    /// As published, the format isn't normalized
    #[serde(rename = "date")]
    pub effective_date: String,
    #[serde(rename = "in_stop")]
    pub inbound_stop: String,
    #[serde(rename = "out_stop")]
    pub outbound_stop: String,
    #[serde(rename = "in")]
    pub departures_in: Vec<String>,
    #[serde(rename = "out")]
    pub departures_out: Vec<String>,
}

/// Timetables of one line. A `None` category means no file is published for it,
/// which is different from a published file without any departures.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LineSchedule {
    pub week: Option<ScheduleRecord>,
    pub saturday: Option<ScheduleRecord>,
    pub sunday: Option<ScheduleRecord>,
}

impl LineSchedule {
    pub fn set(&mut self, category: DayCategory, record: Option<ScheduleRecord>) {
        match category {
            DayCategory::Week => self.week = record,
            DayCategory::Saturday => self.saturday = record,
            DayCategory::Sunday => self.sunday = record,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayCategory {
    Week,
    Saturday,
    Sunday,
}

impl DayCategory {
    pub const ALL: [DayCategory; 3] = [DayCategory::Week, DayCategory::Saturday, DayCategory::Sunday];

    /// Name of the csv file holding this category's timetable for `line_id`.
    pub fn file_name(self, line_id: &str) -> String {
        let suffix = match self {
            DayCategory::Week => "lv",
            DayCategory::Saturday => "s",
            DayCategory::Sunday => "d",
        };

        format!("orar_{line_id}_{suffix}.csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_per_category() {
        assert_eq!(DayCategory::Week.file_name("25"), "orar_25_lv.csv");
        assert_eq!(DayCategory::Saturday.file_name("25"), "orar_25_s.csv");
        assert_eq!(DayCategory::Sunday.file_name("M26"), "orar_M26_d.csv");
    }

    #[test]
    fn absent_categories_serialize_as_null() -> Result<(), anyhow::Error> {
        let schedule = LineSchedule {
            week: Some(ScheduleRecord {
                route_name: "Line 5".to_string(),
                effective_date: "2024-01-01".to_string(),
                inbound_stop: "Main St".to_string(),
                outbound_stop: "Depot".to_string(),
                departures_in: vec!["07:00".to_string()],
                departures_out: vec!["07:05".to_string()],
            }),
            saturday: None,
            sunday: None,
        };

        let json = serde_json::to_value(&schedule)?;

        assert_eq!(json["week"]["name"], "Line 5");
        assert_eq!(json["week"]["in"], serde_json::json!(["07:00"]));
        assert_eq!(json["week"]["out_stop"], "Depot");
        assert!(json["saturday"].is_null());
        assert!(json.as_object().is_some_and(|o| o.contains_key("sunday")));

        Ok(())
    }

    #[test]
    fn set_by_category() {
        let mut schedule = LineSchedule::default();
        schedule.set(DayCategory::Sunday, Some(ScheduleRecord::default()));

        assert!(schedule.sunday.is_some());
        assert!(schedule.week.is_none());
        assert!(schedule.saturday.is_none());
    }
}
