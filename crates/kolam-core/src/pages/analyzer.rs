//! Upload-and-analyze screen.

use kolam_analysis::{AnalysisReport, FeatureTile, KolamKind};
use tracing::warn;

use super::{Notification, Notifications, PageResult};
use crate::api::MockApi;

#[derive(Debug, Default)]
pub struct AnalyzerPage {
    pub kind: KolamKind,
    image: Option<Vec<u8>>,
    analyzing: bool,
    report: Option<AnalysisReport>,
    notifications: Notifications,
}

impl AnalyzerPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_kind(&mut self, kind: KolamKind) {
        self.kind = kind;
    }

    /// Replace the uploaded image and clear any previous result.
    pub fn upload(&mut self, image: Vec<u8>) {
        self.image = Some(image);
        self.report = None;
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        self.report.as_ref()
    }

    pub fn feature_tiles(&self) -> Vec<FeatureTile> {
        self.report
            .as_ref()
            .map(AnalysisReport::feature_tiles)
            .unwrap_or_default()
    }

    pub fn notifications(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub async fn analyze(&mut self, api: &MockApi) -> PageResult<()> {
        let Some(image) = self.image.as_deref() else {
            self.notifications.push(Notification::error(
                "Image required",
                "Upload a kolam image to analyze.",
            ));
            return Ok(());
        };

        self.analyzing = true;
        let outcome = api.analyze_kolam(image, self.kind).await;
        self.analyzing = false;

        match outcome {
            Ok(report) => {
                self.report = Some(report);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Analysis failed");
                self.notifications.push(Notification::error(
                    "Analysis failed",
                    "Could not analyze this image. Please try another.",
                ));
                Err(e.into())
            }
        }
    }
}
