//! Shared types used across caris-batch.
//! Includes the closed `Operation` catalogue of `carisbatch --run` processes and the
//! product `Family` each one belongs to.
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Family {
    Hips,
    Czmil,
    BaseEditor,
    FeatureEditing,
    Compose,
    EngineeringAnalysis,
    VariableResolution,
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Family::Hips => "HIPS and SIPS",
            Family::Czmil => "CZMIL",
            Family::BaseEditor => "BASE Editor",
            Family::FeatureEditing => "Feature Editing",
            Family::Compose => "Compose",
            Family::EngineeringAnalysis => "Engineering Analysis",
            Family::VariableResolution => "Variable Resolution Surface",
        };
        write!(f, "{}", s)
    }
}

// Variant names are the exact process names expected after `--run`.
macro_rules! operations {
    ($($family:ident => [$($op:ident),* $(,)?]),* $(,)?) => {
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub enum Operation {
            $($($op,)*)*
        }

        impl Operation {
            /// Every known process, grouped by family.
            pub const ALL: &'static [Operation] = &[$($(Operation::$op,)*)*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($(Operation::$op => stringify!($op),)*)*
                }
            }

            pub fn family(&self) -> Family {
                match self {
                    $($(Operation::$op => Family::$family,)*)*
                }
            }
        }
    };
}

operations! {
    Hips => [
        AddKrakenTILToMosaic,
        AddToHIPSGrid,
        AddToSIPSMosaic,
        ClassifyHIPSNoise,
        CompareHIPS,
        ComputeHIPSSeparationModel,
        ComputeSIPSTowfishNavigation,
        ComputeHIPSBoresightCalibration,
        CopyHIPStoHIPS,
        CreateHIPSFile,
        CreateHIPSGrid,
        CreateHIPSVesselFile,
        CreateSIPSBeamPattern,
        CreateSIPSMosaic,
        DetectHIPSCriticalSoundings,
        ExportHIPS,
        FilterHIPSAttitude,
        FilterObservedDepths,
        FilterProcessedDepths,
        GeoreferenceHIPSBathymetry,
        ImportGenericToHIPS,
        ImportHIPSFromAuxiliary,
        ImportKrakenTILToMosaic,
        ImportMultipleDetectionsToHIPS,
        ImportTideToHIPS,
        ImportToHIPS,
        MoveHIPSToHIPS,
        RecomputeHIPSGrid,
        RemoveFromHIPSGrid,
        RemoveFromSIPSMosaic,
        ResetHIPSStatus,
        SetHIPSNavigationSource,
        ShiftHIPSNavigation,
        SoundVelocityCorrectHIPS,
        UpdateHIPSAdditionalBathymetry,
        UpdateRasterCUBEDisambiguation,
        UpdateSIPSContactPositions,
        UpdateSVPPositions,
    ],
    Czmil => [
        ClassifyCZMILNoise,
        CompareCZMILToReference,
        ComputeCZMILCalibration,
        ConvertCZMILCameraImages,
        ConvertCZMILRAW,
        ExportCZMILToLAS,
        ExportCZMILWaveforms,
        FilterCZMILPoints,
        GeoreferenceCZMILPoints,
        ImportCZMILToSurvey,
        ImportCZMILRawToSurvey,
        OptimizeCZMILReflectance,
        UpdateCZMILDeepChannelRangeOffset,
        UpdateCZMILFromLAS,
    ],
    BaseEditor => [
        AddComputedBand,
        AddEmptyBand,
        AddSlopeBands,
        AddSmoothedBand,
        AddToRasterCombine,
        ClassifyPointsForCartography,
        ClassifyRasterHolidays,
        ClipRaster,
        CombineToRaster,
        ConflateFeatureGeometry,
        ContourRaster,
        CopyToCSAR,
        CreateDepthAreas,
        CreateSoundingsFromCoverage,
        DeleteBand,
        DifferenceCoverages,
        ExpandIsolationsForCartography,
        ExportCoverageMetadata,
        ExportCoverageToASCII,
        ExportPoints,
        ExportRaster,
        ExportRasterToSTL,
        ExtractCoverage,
        FillRasterHolidays,
        FilterCoverage,
        FinalizeRaster,
        GeneralizeRaster,
        GridPoints,
        GridPointsUsingCUBE,
        ImportPoints,
        JoinPoints,
        RebalancePoints,
        RemoveDeepIsolations,
        RenderRaster,
        RepairCoverage,
        ResampleSurfaceToRaster,
        ShiftElevationBands,
        SmoothFeaturesByDirectionBias,
        SplitCoverage,
        ThinPoints,
        TileRaster,
        UpdateBandValues,
        ValidateCoverage,
        VectorizeRaster,
        WarpPoints,
        WarpRaster,
    ],
    FeatureEditing => [
        AddBridgesBetweenMatchingLines,
        AddFeatures,
        AddGeometryAttributes,
        BufferFeatures,
        ChangeFeatureAttributes,
        ClipFeatures,
        CreateAreasFromLines,
        CreateFeatureRelationships,
        CreateFeaturesFromFeatures,
        CreateLinesFromAreas,
        DeleteFeatures,
        DensifyFeatures,
        DissolveFeatures,
        EraseFeatures,
        ExportFeaturesToShapefile,
        ExportToWKT,
        FilterFeatures,
        FilterFeaturesBySpatialRelation,
        SimplifyFeatures,
        SmoothFeatures,
        UpdateFeatures,
    ],
    Compose => [
        AssignSoundingSCAMINValues,
        AssignFeatureScaminValues,
        ExportS57Product,
        ModifyS57Header,
        ReassignS57FOIDs,
    ],
    EngineeringAnalysis => [
        CalculateCoverageVolumes,
        ContourRasterByModel,
    ],
    VariableResolution => [
        AddToVRSurface,
        CreateVRSurface,
        ExportVRSurfaceToBAG,
        FinalizeVRSurface,
        ImportVRSurface,
        PopulateVRSurface,
        RemoveFromVRSurface,
        UpdateVRCUBEDisambiguation,
    ],
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownOperation {
                name: s.to_string(),
            })
    }
}

// Manual implementation so clap accepts the exact external spelling
impl clap::ValueEnum for Operation {
    fn value_variants<'a>() -> &'a [Self] {
        Operation::ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}
