//! Literal content of the CV template.
//!
//! The profile service only supplies name, job title and trainings. Everything
//! else here is fill-in-the-blanks text kept verbatim.

pub const TITLE_KICKER: &str = "CV";

// ── Palette ─────────────────────────────────────────────────────────────────

pub const LIGHT_GRAY: &str = "lightgray";
pub const DARK_GRAY: &str = "darkgray";
pub const SECTION_GRAY: &str = "sectiongray";
pub const CEGEKA_GREEN: &str = "cegekagreen";
pub const CEGEKA_BLUE: &str = "cegekablue";
pub const WHITE: &str = "white";

pub const PALETTE: &[(&str, u8, u8, u8)] = &[
    (LIGHT_GRAY, 220, 220, 220),
    (DARK_GRAY, 197, 197, 197),
    (SECTION_GRAY, 137, 139, 144),
    (CEGEKA_GREEN, 122, 178, 40),
    (CEGEKA_BLUE, 51, 107, 159),
];

pub const MAIN_FONT: &str = "Calibri";
pub const ROW_STRETCH: f32 = 1.5;

// ── Intro ───────────────────────────────────────────────────────────────────

pub const PERSONAL_DETAILS: &[(&str, &str)] = &[
    ("Geboortedatum:", "01/01/1991"),
    ("Geslacht:", "M"),
    ("Nationaliteit:", "Belg"),
];

pub const PROFILE_DESCRIPTION: &str =
    "Profielbeschrijving - overzicht van vakkundigheid en ervaring";

// ── Professional experience ─────────────────────────────────────────────────

pub const EXPERIENCE_HEADING: &str = "PROFESSIONELE ERVARING";
pub const EXPERIENCE_EMPLOYER: &str = "CEGEKA";
pub const EXPERIENCE_PERIOD: &str = "Augustus 1900 - Juni 1901";

/// Label/value rows before the responsibilities list.
pub const EXPERIENCE_FIELDS: &[(&str, &str)] = &[
    ("Periode", EXPERIENCE_PERIOD),
    ("Klant", ""),
    ("Project", ""),
    ("Rol", ""),
    ("Omschrijving", ""),
];

pub const RESPONSIBILITIES_LABEL: &str = "Verantwoordelijkheden";
pub const RESPONSIBILITIES: &[&str] = &["verantwoordelijkheid 1", "verantwoordelijkheid 2"];
pub const ENVIRONMENT_LABEL: &str = "Omgeving";

// ── Education ───────────────────────────────────────────────────────────────

pub const EDUCATION_HEADING: &str = "OPLEIDING";
pub const EDUCATION_TABLE_SPACING: &str = "1.5cm";

pub const INSTITUTION_HEADER: &str = "INSTELLING";
pub const YEAR_HEADER: &str = "JAAR";

pub const DIPLOMA_HEADER: &str = "DIPLOMA";
pub const DIPLOMAS: &[[&str; 3]] = &[
    ["Bachelor Informatica", "KU Leuven", "2000"],
    ["Bachelor Informatica", "KU Leuven", "2000"],
];

pub const CERTIFICATE_HEADER: &str = "CERTIFICATEN";
pub const CERTIFICATES: &[[&str; 3]] = &[
    ["Certified Java", "Oracle", "2000"],
    ["Certified Java", "Oracle", "2000"],
];

pub const TRAINING_HEADER: &str = "TRAINING/CURSUSSEN";
