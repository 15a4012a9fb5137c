use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// A block of the echocardiography protocol. Every measurement and derived
/// metric belongs to exactly one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Section {
    Anthropometrics,
    Aorta,
    AorticValve,
    LeftVentricle,
    OtherChambers,
    MitralValve,
    TricuspidValve,
    PulmonaryArtery,
}

impl Section {
    /// Protocol order.
    pub const ALL: [Section; 8] = [
        Section::Anthropometrics,
        Section::Aorta,
        Section::AorticValve,
        Section::LeftVentricle,
        Section::OtherChambers,
        Section::MitralValve,
        Section::TricuspidValve,
        Section::PulmonaryArtery,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::Anthropometrics => "anthropometrics",
            Section::Aorta => "aorta",
            Section::AorticValve => "aortic_valve",
            Section::LeftVentricle => "left_ventricle",
            Section::OtherChambers => "other_chambers",
            Section::MitralValve => "mitral_valve",
            Section::TricuspidValve => "tricuspid_valve",
            Section::PulmonaryArtery => "pulmonary_artery",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Section::Anthropometrics => "Anthropometrics",
            Section::Aorta => "Aorta",
            Section::AorticValve => "Aortic Valve",
            Section::LeftVentricle => "Left Ventricle",
            Section::OtherChambers => "Other Chambers",
            Section::MitralValve => "Mitral Valve",
            Section::TricuspidValve => "Tricuspid Valve",
            Section::PulmonaryArtery => "Pulmonary Artery",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.id() == s)
            .ok_or_else(|| CoreError::UnknownSection(s.to_string()))
    }
}
