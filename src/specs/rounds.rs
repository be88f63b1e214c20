// src/specs/rounds.rs
use crate::config::consts::FALLBACK_COLOR;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Round {
    First,
    Runoff,
}

impl Round {
    pub const ALL: [Round; 2] = [Round::First, Round::Runoff];

    pub fn label(&self) -> &'static str {
        match self {
            Round::First => "First round",
            Round::Runoff => "Runoff",
        }
    }
}

/// One polling table on the page and how to read it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundSpec {
    pub round: Round,
    /// 0-based index among tables carrying the layout class.
    pub table_index: usize,
    /// (source header, canonical name). Output column order follows this list.
    pub columns: &'static [(&'static str, &'static str)],
    pub institute: &'static str,
    pub date: &'static str,
    /// Canonical names coerced to numbers, in display order.
    pub candidates: &'static [&'static str],
    /// Pre-selected in the dashboard.
    pub default_selected: &'static [&'static str],
}

pub const INSTITUTE: &str = "Instituto";
pub const DATE: &str = "Data";

pub const FIRST_ROUND: RoundSpec = RoundSpec {
    round: Round::First,
    table_index: 0,
    columns: &[
        ("Polling firm", INSTITUTE),
        ("Polling period", DATE),
        ("Lula", "Lula"),
        ("Freitas", "Tarcísio"),
        ("Gomes", "Ciro Gomes"),
        ("Ratinho", "Ratinho Jr."),
        ("Zema", "Zema"),
        ("Caiado", "Caiado"),
        ("Others", "Outros"),
        ("BlankNullUndec.", "Branco / Nulo / Indeciso"),
    ],
    institute: INSTITUTE,
    date: DATE,
    candidates: &[
        "Lula",
        "Tarcísio",
        "Ciro Gomes",
        "Ratinho Jr.",
        "Zema",
        "Caiado",
        "Outros",
        "Branco / Nulo / Indeciso",
    ],
    default_selected: &["Lula", "Tarcísio", "Zema", "Branco / Nulo / Indeciso"],
};

pub const RUNOFF: RoundSpec = RoundSpec {
    round: Round::Runoff,
    table_index: 1,
    columns: &[
        ("Polling firm", INSTITUTE),
        ("Polling period", DATE),
        ("Lula", "Lula"),
        ("Freitas", "Tarcísio"),
    ],
    institute: INSTITUTE,
    date: DATE,
    candidates: &["Lula", "Tarcísio"],
    default_selected: &["Lula", "Tarcísio"],
};

/// Party colors, cosmetic only.
pub const PALETTE: &[(&str, &str)] = &[
    ("Lula", "#FF0000"),
    ("Tarcísio", "#0070C5"),
    ("Ciro Gomes", "#C21E56"),
    ("Ratinho Jr.", "#FFA500"),
    ("Zema", "#F3701B"),
    ("Caiado", "#2FBEF2"),
    ("Outros", "#808080"),
    ("Branco / Nulo / Indeciso", "#404040"),
];

pub fn color_for(candidate: &str) -> &'static str {
    PALETTE
        .iter()
        .find(|(name, _)| *name == candidate)
        .map(|(_, hex)| *hex)
        .unwrap_or(FALLBACK_COLOR)
}
