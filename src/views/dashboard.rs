//! Dashboard totals and the AI field summary.

use serde::Serialize;
use serde_json::json;

use crate::ai::{GenerationOptions, TextGateway};
use crate::models::{count, ApprovalStatus, FieldReport, MaintenanceReport, Sheets};

pub const INSIGHT_NO_DATA: &str = "لا توجد بيانات كافية للتحليل حالياً.";
pub const INSIGHT_FAILED: &str =
    "حدث خطأ أثناء محاولة تحليل البيانات ذكياً. يرجى مراجعة التقارير يدوياً.";

const INSIGHT_SYSTEM: &str = "أنت مساعد إداري ذكي لمؤسسة عبدالله الراجحي الخيرية. كن دقيقاً، مهنياً، ومختصراً في نقاط واضحة.";

/// Field report totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTotals {
    pub reports: usize,
    /// Men and women
    pub attendees: u64,
    /// Supported iftar meals
    pub iftar_meals: u64,
    /// Male and female Quran-circle students
    pub circle_students: u64,
}

impl FieldTotals {
    pub fn over<'a>(records: impl IntoIterator<Item = &'a FieldReport>) -> Self {
        records.into_iter().fold(Self::default(), |mut acc, r| {
            acc.reports += 1;
            acc.attendees += count(&r.attendees_men) + count(&r.attendees_women);
            acc.iftar_meals += count(&r.iftar_supported);
            acc.circle_students += count(&r.circle_students_male) + count(&r.circle_students_female);
            acc
        })
    }
}

/// Maintenance report totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTotals {
    pub reports: usize,
    pub cleaning_tasks: u64,
    pub maintenance_tasks: u64,
    pub water_cartons: u64,
}

impl MaintenanceTotals {
    pub fn over<'a>(records: impl IntoIterator<Item = &'a MaintenanceReport>) -> Self {
        records.into_iter().fold(Self::default(), |mut acc, r| {
            acc.reports += 1;
            acc.cleaning_tasks += count(&r.cleaning_count);
            acc.maintenance_tasks += count(&r.maintenance_count);
            acc.water_cartons += count(&r.water_cartons);
            acc
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Every field report held in state
    pub all: FieldTotals,
    /// Approved field reports only
    pub approved: FieldTotals,
    pub maintenance: MaintenanceTotals,
    pub photo_count: usize,
}

pub fn summarize(sheets: &Sheets) -> DashboardSummary {
    let reports = &sheets.field_reports;
    DashboardSummary {
        all: FieldTotals::over(reports),
        approved: FieldTotals::over(
            reports
                .iter()
                .filter(|r| r.approval == ApprovalStatus::Approved),
        ),
        maintenance: MaintenanceTotals::over(&sheets.maintenance_reports),
        photo_count: sheets.photos.len(),
    }
}

fn insight_prompt(records: &[FieldReport]) -> String {
    let summary: Vec<_> = records
        .iter()
        .map(|r| {
            json!({
                "mosque": r.mosque_name,
                "attendance": count(&r.attendees_men) + count(&r.attendees_women),
                "meals": r.iftar_actual,
                "notes": r.notes,
                "status": r.approval,
            })
        })
        .collect();

    format!(
        "أنت محلل بيانات ذكي لمشاريع رمضان. حلل البيانات التالية لعدد من المساجد وقدم تقريراً تنفيذياً باللغة العربية:\n\
         - لخص الحالة العامة للميدان.\n\
         - استخرج أي مشاكل أو ملاحظات سلبية تتكرر في المساجد (مثل نقص المياه، ازدحام، ملاحظات صيانة).\n\
         - قدم 3 توصيات ذكية للمشرفين لتحسين التجربة غداً.\n\n\
         البيانات: {}",
        serde_json::Value::Array(summary)
    )
}

/// Executive summary of every report in memory. Never fails: errors degrade
/// to a fixed apology.
pub async fn insight(ai: &TextGateway, records: &[FieldReport]) -> String {
    if records.is_empty() {
        return INSIGHT_NO_DATA.to_string();
    }

    let options = GenerationOptions {
        system_instruction: INSIGHT_SYSTEM,
        temperature: 0.7,
        response_schema: None,
    };

    match ai.generate(&insight_prompt(records), &options).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "Field insight failed, using fallback");
            INSIGHT_FAILED.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PhotoRecord;

    fn report(men: &str, women: &str, iftar: &str, boys: &str, girls: &str, status: ApprovalStatus) -> FieldReport {
        FieldReport {
            attendees_men: men.into(),
            attendees_women: women.into(),
            iftar_supported: iftar.into(),
            circle_students_male: boys.into(),
            circle_students_female: girls.into(),
            approval: status,
            ..FieldReport::default()
        }
    }

    #[test]
    fn test_totals() {
        let sheets = Sheets {
            field_reports: vec![
                report("100", "20", "50", "10", "5", ApprovalStatus::Approved),
                report("30", "", "abc", "2", "", ApprovalStatus::Pending),
                report("1", "1", "1", "1", "1", ApprovalStatus::Rejected),
            ],
            maintenance_reports: vec![MaintenanceReport {
                cleaning_count: "4".into(),
                maintenance_count: "2".into(),
                water_cartons: "10".into(),
                ..MaintenanceReport::default()
            }],
            photos: vec![PhotoRecord::default()],
            ..Sheets::default()
        };

        let summary = summarize(&sheets);
        assert_eq!(
            summary.all,
            FieldTotals {
                reports: 3,
                attendees: 152,
                iftar_meals: 51,
                circle_students: 19,
            }
        );
        assert_eq!(
            summary.approved,
            FieldTotals {
                reports: 1,
                attendees: 120,
                iftar_meals: 50,
                circle_students: 15,
            }
        );
        assert_eq!(summary.maintenance.water_cartons, 10);
        assert_eq!(summary.photo_count, 1);
    }

    #[test]
    fn test_empty_state() {
        let summary = summarize(&Sheets::default());
        assert_eq!(summary.all, FieldTotals::default());
    }

    #[test]
    fn test_prompt_includes_every_record() {
        let mut a = report("10", "5", "", "", "", ApprovalStatus::Pending);
        a.mosque_name = "جامع النور".into();
        a.notes = "نقص المياه".into();
        let prompt = insight_prompt(&[a]);

        assert!(prompt.contains("جامع النور"));
        assert!(prompt.contains("\"attendance\":15"));
        assert!(prompt.contains("نقص المياه"));
    }

    #[tokio::test]
    async fn test_insight_without_records() {
        let ai = TextGateway::new("http://127.0.0.1:9", "m", Some("k".into())).unwrap();
        assert_eq!(insight(&ai, &[]).await, INSIGHT_NO_DATA);
    }

    #[tokio::test]
    async fn test_insight_falls_back_on_error() {
        let ai = TextGateway::new("http://127.0.0.1:9", "m", None).unwrap();
        let records = vec![report("1", "1", "1", "1", "1", ApprovalStatus::Pending)];
        assert_eq!(insight(&ai, &records).await, INSIGHT_FAILED);
    }
}
