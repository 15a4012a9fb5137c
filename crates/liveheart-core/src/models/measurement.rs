use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::section::Section;
use crate::error::CoreError;

/// A raw echocardiographic input field.
///
/// The serialized form is the stable field id (e.g. `lv_edd`), which is also
/// what [`MeasurementKey::id`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MeasurementKey {
    Height,
    Weight,

    AortaDiameter,
    AortaValveOpening,

    AvPeakVelocity,
    AvGradientMax,
    AvGradientMean,
    AvArea,
    AvRegurgitation,

    LvIvsd,
    LvEdd,
    LvEsd,
    LvPw,
    LvEdv,
    LvEsv,
    LvHr,

    LaDiameter,
    RaDiameter,
    RvDiameter,
    LaVolume,

    MvE,
    MvA,
    MvGradientMax,
    MvDte,
    MvIvrt,
    MvRegurgitation,

    TvE,
    TvA,
    TvGradientMax,
    TvTapse,
    TvRegurgitation,

    PaDiameter,
    PaGradientMax,
    PaVelocity,
    PaAt,
    PaEt,
    PaRegurgitation,
    IvcDiameter,
}

/// Static description of a measurement field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub unit: &'static str,
    pub section: Section,
}

impl MeasurementKey {
    /// Every measurement, in protocol order.
    pub const ALL: [MeasurementKey; 38] = [
        MeasurementKey::Height,
        MeasurementKey::Weight,
        MeasurementKey::AortaDiameter,
        MeasurementKey::AortaValveOpening,
        MeasurementKey::AvPeakVelocity,
        MeasurementKey::AvGradientMax,
        MeasurementKey::AvGradientMean,
        MeasurementKey::AvArea,
        MeasurementKey::AvRegurgitation,
        MeasurementKey::LvIvsd,
        MeasurementKey::LvEdd,
        MeasurementKey::LvEsd,
        MeasurementKey::LvPw,
        MeasurementKey::LvEdv,
        MeasurementKey::LvEsv,
        MeasurementKey::LvHr,
        MeasurementKey::LaDiameter,
        MeasurementKey::RaDiameter,
        MeasurementKey::RvDiameter,
        MeasurementKey::LaVolume,
        MeasurementKey::MvE,
        MeasurementKey::MvA,
        MeasurementKey::MvGradientMax,
        MeasurementKey::MvDte,
        MeasurementKey::MvIvrt,
        MeasurementKey::MvRegurgitation,
        MeasurementKey::TvE,
        MeasurementKey::TvA,
        MeasurementKey::TvGradientMax,
        MeasurementKey::TvTapse,
        MeasurementKey::TvRegurgitation,
        MeasurementKey::PaDiameter,
        MeasurementKey::PaGradientMax,
        MeasurementKey::PaVelocity,
        MeasurementKey::PaAt,
        MeasurementKey::PaEt,
        MeasurementKey::PaRegurgitation,
        MeasurementKey::IvcDiameter,
    ];

    pub fn info(self) -> MeasurementInfo {
        use MeasurementKey::*;
        use Section::*;

        let (id, name, unit, section) = match self {
            Height => ("height", "Height", "cm", Anthropometrics),
            Weight => ("weight", "Weight", "kg", Anthropometrics),

            AortaDiameter => ("aorta_diameter", "Aortic root diameter", "mm", Aorta),
            AortaValveOpening => ("aorta_valve_opening", "Aortic cusp separation", "mm", Aorta),

            AvPeakVelocity => ("av_peak_velocity", "Peak velocity (Vmax)", "m/s", AorticValve),
            AvGradientMax => ("av_gradient_max", "Peak pressure gradient", "mmHg", AorticValve),
            AvGradientMean => ("av_gradient_mean", "Mean pressure gradient", "mmHg", AorticValve),
            AvArea => ("av_area", "Valve area", "cm²", AorticValve),
            AvRegurgitation => ("av_regurgitation", "Regurgitation", "grade", AorticValve),

            LvIvsd => ("lv_ivsd", "Interventricular septum (diastole)", "cm", LeftVentricle),
            LvEdd => ("lv_edd", "End-diastolic diameter", "cm", LeftVentricle),
            LvEsd => ("lv_esd", "End-systolic diameter", "cm", LeftVentricle),
            LvPw => ("lv_pw", "Posterior wall (diastole)", "cm", LeftVentricle),
            LvEdv => ("lv_edv", "End-diastolic volume", "ml", LeftVentricle),
            LvEsv => ("lv_esv", "End-systolic volume", "ml", LeftVentricle),
            LvHr => ("lv_hr", "Heart rate", "bpm", LeftVentricle),

            LaDiameter => ("la_diameter", "Left atrium", "mm", OtherChambers),
            RaDiameter => ("ra_diameter", "Right atrium", "mm", OtherChambers),
            RvDiameter => ("rv_diameter", "Right ventricle", "mm", OtherChambers),
            LaVolume => ("la_volume", "Left atrium volume", "ml", OtherChambers),

            MvE => ("mv_e", "E wave", "cm/s", MitralValve),
            MvA => ("mv_a", "A wave", "cm/s", MitralValve),
            MvGradientMax => ("mv_gradient_max", "Peak pressure gradient", "mmHg", MitralValve),
            MvDte => ("mv_dte", "E deceleration time", "ms", MitralValve),
            MvIvrt => ("mv_ivrt", "Isovolumic relaxation time", "ms", MitralValve),
            MvRegurgitation => ("mv_regurgitation", "Regurgitation", "grade", MitralValve),

            TvE => ("tv_e", "E wave", "cm/s", TricuspidValve),
            TvA => ("tv_a", "A wave", "cm/s", TricuspidValve),
            TvGradientMax => ("tv_gradient_max", "Peak pressure gradient", "mmHg", TricuspidValve),
            TvTapse => ("tv_tapse", "TAPSE", "mm", TricuspidValve),
            TvRegurgitation => ("tv_regurgitation", "Regurgitation", "grade", TricuspidValve),

            PaDiameter => ("pa_diameter", "Trunk diameter", "mm", PulmonaryArtery),
            PaGradientMax => ("pa_gradient_max", "Peak pressure gradient", "mmHg", PulmonaryArtery),
            PaVelocity => ("pa_velocity", "Peak velocity", "m/s", PulmonaryArtery),
            PaAt => ("pa_at", "Acceleration time", "ms", PulmonaryArtery),
            PaEt => ("pa_et", "Ejection time", "ms", PulmonaryArtery),
            PaRegurgitation => ("pa_regurgitation", "Regurgitation", "grade", PulmonaryArtery),
            IvcDiameter => ("ivc_diameter", "Inferior vena cava", "mm", PulmonaryArtery),
        };

        MeasurementInfo {
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

    /// Measurements belonging to `section`, in protocol order.
    pub fn in_section(section: Section) -> impl Iterator<Item = MeasurementKey> {
        MeasurementKey::ALL
            .into_iter()
            .filter(move |key| key.section() == section)
    }
}

impl fmt::Display for MeasurementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for MeasurementKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MeasurementKey::ALL
            .into_iter()
            .find(|key| key.id() == s)
            .ok_or_else(|| CoreError::UnknownMeasurement(s.to_string()))
    }
}
