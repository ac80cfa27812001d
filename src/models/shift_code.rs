use ansi_term::Colour;
use serde::{Serialize, Serializer};

/// A day's assignment for one staff member.
/// Serializes as its short code ("N", "MOT", ...) everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftCode {
    Night,          // N
    Morning,        // M
    Evening,        // E
    Off,            // O
    MorningOt,      // MOT
    NightOt,        // NOT
    AnnualLeave,    // AL
    ControlRoom,    // CTR
    CallG,          // CG
    EmergencyLeave, // EL
    Training,       // TR
    Meeting,        // MT
    Medical,        // MC
}

/// Every known shift code, in display order.
pub const ALL_CODES: [ShiftCode; 13] = [
    ShiftCode::Night,
    ShiftCode::Morning,
    ShiftCode::Evening,
    ShiftCode::Off,
    ShiftCode::MorningOt,
    ShiftCode::NightOt,
    ShiftCode::AnnualLeave,
    ShiftCode::ControlRoom,
    ShiftCode::CallG,
    ShiftCode::EmergencyLeave,
    ShiftCode::Training,
    ShiftCode::Meeting,
    ShiftCode::Medical,
];

/// The default 15-day rotation used by the roster generator:
/// three nights, two off, three evenings, two off, three mornings, two off.
pub const DEFAULT_PATTERN: [ShiftCode; 15] = [
    ShiftCode::Night,
    ShiftCode::Night,
    ShiftCode::Night,
    ShiftCode::Off,
    ShiftCode::Off,
    ShiftCode::Evening,
    ShiftCode::Evening,
    ShiftCode::Evening,
    ShiftCode::Off,
    ShiftCode::Off,
    ShiftCode::Morning,
    ShiftCode::Morning,
    ShiftCode::Morning,
    ShiftCode::Off,
    ShiftCode::Off,
];

impl ShiftCode {
    pub fn code(&self) -> &'static str {
        match self {
            ShiftCode::Night => "N",
            ShiftCode::Morning => "M",
            ShiftCode::Evening => "E",
            ShiftCode::Off => "O",
            ShiftCode::MorningOt => "MOT",
            ShiftCode::NightOt => "NOT",
            ShiftCode::AnnualLeave => "AL",
            ShiftCode::ControlRoom => "CTR",
            ShiftCode::CallG => "CG",
            ShiftCode::EmergencyLeave => "EL",
            ShiftCode::Training => "TR",
            ShiftCode::Meeting => "MT",
            ShiftCode::Medical => "MC",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShiftCode::Night => "Night",
            ShiftCode::Morning => "Morning",
            ShiftCode::Evening => "Evening",
            ShiftCode::Off => "Off",
            ShiftCode::MorningOt => "Morning OT",
            ShiftCode::NightOt => "Night OT",
            ShiftCode::AnnualLeave => "Annual Leave",
            ShiftCode::ControlRoom => "Control Room",
            ShiftCode::CallG => "Call G",
            ShiftCode::EmergencyLeave => "Emergency Lv",
            ShiftCode::Training => "Training",
            ShiftCode::Meeting => "Meeting",
            ShiftCode::Medical => "Medical",
        }
    }

    /// Terminal colour used when rendering the roster grid.
    pub fn colour(&self) -> Colour {
        match self {
            ShiftCode::Night | ShiftCode::NightOt => Colour::Blue,
            ShiftCode::Morning | ShiftCode::MorningOt => Colour::Cyan,
            ShiftCode::Evening | ShiftCode::EmergencyLeave => Colour::Red,
            ShiftCode::Off => Colour::White,
            ShiftCode::AnnualLeave => Colour::Yellow,
            ShiftCode::ControlRoom | ShiftCode::Meeting => Colour::Purple,
            ShiftCode::CallG => Colour::Green,
            ShiftCode::Training => Colour::Cyan,
            ShiftCode::Medical => Colour::Red,
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.code()
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "N" => Some(ShiftCode::Night),
            "M" => Some(ShiftCode::Morning),
            "E" => Some(ShiftCode::Evening),
            "O" => Some(ShiftCode::Off),
            "MOT" => Some(ShiftCode::MorningOt),
            "NOT" => Some(ShiftCode::NightOt),
            "AL" => Some(ShiftCode::AnnualLeave),
            "CTR" => Some(ShiftCode::ControlRoom),
            "CG" => Some(ShiftCode::CallG),
            "EL" => Some(ShiftCode::EmergencyLeave),
            "TR" => Some(ShiftCode::Training),
            "MT" => Some(ShiftCode::Meeting),
            "MC" => Some(ShiftCode::Medical),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (lowercase or uppercase)
    pub fn from_code(code: &str) -> Option<Self> {
        ShiftCode::from_db_str(&code.to_uppercase())
    }
}

impl Serialize for ShiftCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
