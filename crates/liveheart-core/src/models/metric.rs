use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::section::Section;
use crate::error::CoreError;

/// A derived measurement computed from raw inputs and other metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MetricKey {
    Bmi,
    Bsa,
    Fs,
    Sv,
    Ef,
    Mo,
    Co,
    Ci,
    Lvm,
    Lvmi,
    Rwt,
    Lavi,
    MvEa,
    TvEa,
    PaAtEt,
    Mpap,
}

/// Static description of a derived metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub unit: &'static str,
    pub section: Section,
}

impl MetricKey {
    pub const ALL: [MetricKey; 16] = [
        MetricKey::Bmi,
        MetricKey::Bsa,
        MetricKey::Fs,
        MetricKey::Sv,
        MetricKey::Ef,
        MetricKey::Mo,
        MetricKey::Co,
        MetricKey::Ci,
        MetricKey::Lvm,
        MetricKey::Lvmi,
        MetricKey::Rwt,
        MetricKey::Lavi,
        MetricKey::MvEa,
        MetricKey::TvEa,
        MetricKey::PaAtEt,
        MetricKey::Mpap,
    ];

    pub fn info(self) -> MetricInfo {
        use MetricKey::*;
        use Section::*;

        let (id, name, unit, section) = match self {
            Bmi => ("bmi", "Body mass index", "kg/m²", Anthropometrics),
            Bsa => ("bsa", "Body surface area", "m²", Anthropometrics),
            Fs => ("fs", "Fractional shortening", "%", LeftVentricle),
            Sv => ("sv", "Stroke volume", "ml", LeftVentricle),
            Ef => ("ef", "Ejection fraction", "%", LeftVentricle),
            Mo => ("mo", "Minute output", "ml/min", LeftVentricle),
            Co => ("co", "Cardiac output", "l/min", LeftVentricle),
            Ci => ("ci", "Cardiac index", "l/min/m²", LeftVentricle),
            Lvm => ("lvm", "LV mass (Devereux)", "g", LeftVentricle),
            Lvmi => ("lvmi", "LV mass index", "g/m²", LeftVentricle),
            Rwt => ("rwt", "Relative wall thickness", "", LeftVentricle),
            Lavi => ("lavi", "Left atrium volume index", "ml/m²", OtherChambers),
            MvEa => ("mv_ea", "E/A", "", MitralValve),
            TvEa => ("tv_ea", "E/A", "", TricuspidValve),
            PaAtEt => ("pa_at_et", "AT/ET", "", PulmonaryArtery),
            Mpap => ("mpap", "Mean pulmonary artery pressure", "mmHg", PulmonaryArtery),
        };

        MetricInfo {
            id,
            name,
            unit,
            section,
        }
    }

    pub fn id(self) -> &'static str {
        self.info().id
    }

    pub fn section(self) -> Section {
        self.info().section
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for MetricKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKey::ALL
            .into_iter()
            .find(|key| key.id() == s)
            .ok_or_else(|| CoreError::UnknownMetric(s.to_string()))
    }
}
