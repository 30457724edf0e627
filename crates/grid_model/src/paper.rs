//! Paper kinds and their spreadsheet/printer codes

use serde::{Deserialize, Serialize};

/// Code written for paper sizes outside the standard table
pub const CUSTOM_PAPER_CODE: u16 = 256;

/// Standard paper kinds.
///
/// The numeric codes are shared by the spreadsheet `paperSize` attribute
/// and the printer DEVMODE `dmPaperSize` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PaperKind {
    Letter,
    LetterSmall,
    Tabloid,
    Ledger,
    Legal,
    Statement,
    Executive,
    A3,
    #[default]
    A4,
    A4Small,
    A5,
    B4,
    B5,
    Folio,
    Quarto,
    Standard10x14,
    Standard11x17,
    Note,
    Number9Envelope,
    Number10Envelope,
    Number11Envelope,
    Number12Envelope,
    Number14Envelope,
    CSheet,
    DSheet,
    ESheet,
    DlEnvelope,
    C5Envelope,
    C3Envelope,
    C4Envelope,
    C6Envelope,
    C65Envelope,
    B4Envelope,
    B5Envelope,
    B6Envelope,
    ItalyEnvelope,
    MonarchEnvelope,
    PersonalEnvelope,
    UsStandardFanfold,
    GermanStandardFanfold,
    GermanLegalFanfold,
    /// Explicit size in hundredths of an inch
    Custom { width: u32, height: u32 },
}

impl PaperKind {
    /// Spreadsheet / printer paper code; [`CUSTOM_PAPER_CODE`] for custom sizes
    pub fn code(&self) -> u16 {
        use PaperKind::*;
        match self {
            Letter => 1,
            LetterSmall => 2,
            Tabloid => 3,
            Ledger => 4,
            Legal => 5,
            Statement => 6,
            Executive => 7,
            A3 => 8,
            A4 => 9,
            A4Small => 10,
            A5 => 11,
            B4 => 12,
            B5 => 13,
            Folio => 14,
            Quarto => 15,
            Standard10x14 => 16,
            Standard11x17 => 17,
            Note => 18,
            Number9Envelope => 19,
            Number10Envelope => 20,
            Number11Envelope => 21,
            Number12Envelope => 22,
            Number14Envelope => 23,
            CSheet => 24,
            DSheet => 25,
            ESheet => 26,
            DlEnvelope => 27,
            C5Envelope => 28,
            C3Envelope => 29,
            C4Envelope => 30,
            C6Envelope => 31,
            C65Envelope => 32,
            B4Envelope => 33,
            B5Envelope => 34,
            B6Envelope => 35,
            ItalyEnvelope => 36,
            MonarchEnvelope => 37,
            PersonalEnvelope => 38,
            UsStandardFanfold => 39,
            GermanStandardFanfold => 40,
            GermanLegalFanfold => 41,
            Custom { .. } => CUSTOM_PAPER_CODE,
        }
    }

    /// Portrait (width, height) in hundredths of an inch
    pub fn size(&self) -> (u32, u32) {
        use PaperKind::*;
        match self {
            Letter | LetterSmall | Note => (850, 1100),
            Tabloid | Standard11x17 => (1100, 1700),
            Ledger => (1700, 1100),
            Legal => (850, 1400),
            Statement => (550, 850),
            Executive => (725, 1050),
            A3 => (1169, 1654),
            A4 | A4Small => (827, 1169),
            A5 => (583, 827),
            B4 => (1012, 1433),
            B5 => (717, 1012),
            Folio | GermanLegalFanfold => (850, 1300),
            Quarto => (846, 1083),
            Standard10x14 => (1000, 1400),
            Number9Envelope => (387, 888),
            Number10Envelope => (412, 950),
            Number11Envelope => (450, 1038),
            Number12Envelope => (475, 1100),
            Number14Envelope => (500, 1150),
            CSheet => (1700, 2200),
            DSheet => (2200, 3400),
            ESheet => (3400, 4400),
            DlEnvelope => (433, 866),
            C5Envelope => (638, 902),
            C3Envelope => (1276, 1803),
            C4Envelope => (902, 1276),
            C6Envelope => (449, 638),
            C65Envelope => (449, 902),
            B4Envelope => (984, 1390),
            B5Envelope => (693, 984),
            B6Envelope => (693, 492),
            ItalyEnvelope => (433, 906),
            MonarchEnvelope => (387, 750),
            PersonalEnvelope => (362, 650),
            UsStandardFanfold => (1488, 1100),
            GermanStandardFanfold => (850, 1200),
            Custom { width, height } => (*width, *height),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, PaperKind::Custom { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(PaperKind::Letter.code(), 1);
        assert_eq!(PaperKind::A4.code(), 9);
        assert_eq!(PaperKind::GermanLegalFanfold.code(), 41);
        assert_eq!(PaperKind::Custom { width: 500, height: 700 }.code(), 256);
    }

    #[test]
    fn test_sizes() {
        assert_eq!(PaperKind::A4.size(), (827, 1169));
        assert_eq!(PaperKind::Custom { width: 500, height: 700 }.size(), (500, 700));
    }

    #[test]
    fn test_serde_names() {
        let kind: PaperKind = serde_json::from_str("\"a4\"").unwrap();
        assert_eq!(kind, PaperKind::A4);
        let custom: PaperKind =
            serde_json::from_str(r#"{"custom":{"width":600,"height":900}}"#).unwrap();
        assert!(custom.is_custom());
    }
}
