use uuid::Uuid;

use super::{CoachApi, Method};
use crate::error::ApiError;
use crate::model::feedback::{Feedback, FeedbackCreate};
use crate::model::report::{GenerateReportRequest, GenerateReportResponse, Report};

impl CoachApi {
    pub fn get_report(&self, game_id: Uuid) -> Result<Report, ApiError> {
        self.get(&format!("/games/{}/report", game_id))
    }

    pub fn generate_report(
        &self,
        game_id: Uuid,
        request: &GenerateReportRequest,
    ) -> Result<GenerateReportResponse, ApiError> {
        self.send(Method::Post, &format!("/games/{}/generate-report", game_id), request)
    }

    pub fn submit_feedback(&self, report_id: Uuid, feedback: &FeedbackCreate) -> Result<Feedback, ApiError> {
        feedback.check()?;
        self.send(Method::Post, &format!("/reports/{}/feedback", report_id), feedback)
    }
}
