use crate::models::DraftSection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Ordered steps of the sample entry wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    Metadata,
    Morphology,
    Microbiology,
    Molecular,
    Publication,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::Metadata,
        WizardStep::Morphology,
        WizardStep::Microbiology,
        WizardStep::Molecular,
        WizardStep::Publication,
        WizardStep::Review,
    ];

    pub fn first() -> Self {
        WizardStep::Metadata
    }

    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|step| step == self)
            .unwrap_or_default()
    }

    /// Saturates at the last step
    pub fn next(&self) -> Self {
        let idx = (self.index() + 1).min(Self::ALL.len() - 1);
        Self::ALL[idx]
    }

    /// Saturates at the first step
    pub fn previous(&self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }

    pub fn is_last(&self) -> bool {
        self.index() == Self::ALL.len() - 1
    }

    /// Draft section edited on this step; the review step edits nothing
    pub fn section(&self) -> Option<DraftSection> {
        match self {
            WizardStep::Metadata => Some(DraftSection::Metadata),
            WizardStep::Morphology => Some(DraftSection::Morphology),
            WizardStep::Microbiology => Some(DraftSection::Microbiology),
            WizardStep::Molecular => Some(DraftSection::Molecular),
            WizardStep::Publication => Some(DraftSection::Publication),
            WizardStep::Review => None,
        }
    }

    /// Percentage of the wizard completed once this step is shown
    pub fn progress(&self) -> u8 {
        ((self.index() + 1) * 100 / Self::ALL.len()) as u8
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Metadata => "Sample metadata",
            WizardStep::Morphology => "Morphology",
            WizardStep::Microbiology => "Microbiology",
            WizardStep::Molecular => "Molecular data",
            WizardStep::Publication => "Publications",
            WizardStep::Review => "Review and submit",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepInfo {
    pub step: WizardStep,
    pub index: usize,
    pub title: String,
    pub section: Option<DraftSection>,
    pub progress: u8,
}

impl From<WizardStep> for StepInfo {
    fn from(step: WizardStep) -> Self {
        Self {
            step,
            index: step.index(),
            title: step.title().to_string(),
            section: step.section(),
            progress: step.progress(),
        }
    }
}

pub fn steps() -> Vec<StepInfo> {
    WizardStep::ALL.into_iter().map(StepInfo::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_saturates() {
        assert_eq!(WizardStep::first().previous(), WizardStep::Metadata);
        assert_eq!(WizardStep::Metadata.next(), WizardStep::Morphology);
        assert_eq!(WizardStep::Publication.next(), WizardStep::Review);
        assert_eq!(WizardStep::Review.next(), WizardStep::Review);
        assert_eq!(WizardStep::Review.previous(), WizardStep::Publication);
    }

    #[test]
    fn test_progress() {
        assert_eq!(WizardStep::Metadata.progress(), 16);
        assert_eq!(WizardStep::Microbiology.progress(), 50);
        assert_eq!(WizardStep::Review.progress(), 100);
    }

    #[test]
    fn test_every_section_has_a_step() {
        let sections: Vec<_> = WizardStep::ALL.iter().filter_map(|s| s.section()).collect();
        assert_eq!(sections, DraftSection::ALL.to_vec());
        assert!(WizardStep::Review.is_last());
        assert_eq!(steps().len(), 6);
    }
}
