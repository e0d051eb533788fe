//! Rule-based admission insights: likelihood scoring, enrollment forecasting and
//! marketing channel planning.
//!
//! Every engine here is a pure function of its input. The forecaster takes the
//! evaluation date explicitly instead of reading the clock.

mod admission;
mod forecast;
mod marketing;

#[cfg(test)]
mod tests;

pub use admission::{predict_admission, AdmissionPrediction, LeadSignal, ADMISSION_CONFIDENCE};
pub use forecast::{
    forecast_enrollment, EnrollmentForecast, EnrollmentTrend, ForecastInput, MonthlyEnrollment,
    FORECAST_CONFIDENCE,
};
pub use marketing::{recommend_marketing, MarketingRecommendation, MarketingRequest};
