//! Coming-soon page.

use serde::Serialize;

use super::{success, ApiResult};

#[derive(Debug, Serialize)]
pub struct LandingPage {
    pub title: &'static str,
    pub message: &'static str,
    pub footer: &'static str,
}

/// GET / - Placeholder shown before the portal launches.
pub async fn landing() -> ApiResult<LandingPage> {
    success(LandingPage {
        title: "قريباً...",
        message: "نعمل حالياً على تجهيز البوابة الإلكترونية لمشروع رمضان 1447هـ. ترقبوا الإطلاق الرسمي.",
        footer: "مؤسسة عبدالله بن عبدالعزيز الراجحي الخيرية",
    })
}
