//! Controlled Vocabulary (CV) parameters describing binary data arrays
//!
//! Every `<binaryDataArray>` in mzML carries a handful of cvParams that name
//! its precision, its compression and the quantity it holds. This module holds
//! the parameter record and the accessions the codec understands.

use serde::{Deserialize, Serialize};

/// A controlled vocabulary parameter attached to a binary data array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CvParam {
    /// CV reference (e.g., "MS" for PSI-MS)
    pub cv_ref: String,

    /// Accession number (e.g., "MS:1000574")
    pub accession: String,

    /// Human-readable name
    pub name: String,

    /// Optional value
    pub value: Option<String>,
}

impl CvParam {
    /// Create a PSI-MS parameter without a value
    pub fn ms(accession: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            cv_ref: "MS".to_string(),
            accession: accession.into(),
            name: name.into(),
            value: None,
        }
    }

    /// Check if this is a boolean CV param (no value means true)
    pub fn is_flag(&self) -> bool {
        self.value.is_none()
    }
}

/// PSI-MS accessions used by binary data arrays
#[allow(non_snake_case)]
pub mod MS_CV_ACCESSIONS {
    // =========================================================================
    // Binary data precision
    // =========================================================================

    /// 32-bit integer
    pub const INTEGER_32_BIT: &str = "MS:1000519";

    /// 32-bit float
    pub const FLOAT_32_BIT: &str = "MS:1000521";

    /// 64-bit integer
    pub const INTEGER_64_BIT: &str = "MS:1000522";

    /// 64-bit float
    pub const FLOAT_64_BIT: &str = "MS:1000523";

    // =========================================================================
    // Binary data compression
    // =========================================================================

    /// zlib compression
    pub const ZLIB_COMPRESSION: &str = "MS:1000574";

    /// No compression
    pub const NO_COMPRESSION: &str = "MS:1000576";

    /// MS-Numpress linear prediction
    pub const NUMPRESS_LINEAR: &str = "MS:1002312";

    /// MS-Numpress positive integer compression
    pub const NUMPRESS_PIC: &str = "MS:1002313";

    /// MS-Numpress short logged float compression
    pub const NUMPRESS_SLOF: &str = "MS:1002314";

    /// MS-Numpress linear prediction followed by zlib
    pub const NUMPRESS_LINEAR_ZLIB: &str = "MS:1002746";

    /// MS-Numpress positive integer followed by zlib
    pub const NUMPRESS_PIC_ZLIB: &str = "MS:1002747";

    /// MS-Numpress short logged float followed by zlib
    pub const NUMPRESS_SLOF_ZLIB: &str = "MS:1002748";

    /// Aird combo compression (integer codec + zstd)
    pub const AIRD_COMBO_COMPRESSION: &str = "MS:1002844";

    // =========================================================================
    // Binary array types
    // =========================================================================

    /// m/z array
    pub const MZ_ARRAY: &str = "MS:1000514";

    /// Intensity array
    pub const INTENSITY_ARRAY: &str = "MS:1000515";

    /// Time array
    pub const TIME_ARRAY: &str = "MS:1000595";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ms_param_is_flag() {
        let param = CvParam::ms(MS_CV_ACCESSIONS::ZLIB_COMPRESSION, "zlib compression");
        assert_eq!(param.cv_ref, "MS");
        assert!(param.is_flag());
    }
}
