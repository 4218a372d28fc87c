//! Compiled-in icon definitions.
//!
//! Each icon is 16 rows of 16 symbols so the art stays editable in source.
//! Colors are kept fairly dim so they do not overpower the panel at low
//! brightness.

use crate::traits::Rgb;

use super::EncodedIcon;

const BLACK: Rgb = Rgb::new(0, 0, 0);
const WHITE: Rgb = Rgb::new(255, 255, 255);
const YELLOW: Rgb = Rgb::new(255, 220, 0);
const ORANGE: Rgb = Rgb::new(255, 120, 0);
const BLUE: Rgb = Rgb::new(0, 120, 255);
const LGREY: Rgb = Rgb::new(140, 140, 140);
const GREEN: Rgb = Rgb::new(0, 210, 0);
const CYAN: Rgb = Rgb::new(0, 200, 200);
const PURPLE: Rgb = Rgb::new(180, 0, 180);

// Sun: solid yellow, the outer ring is shaded orange after decoding.
static PAL_CLEAR: [Rgb; 2] = [BLACK, YELLOW];
static SUN_ROWS: [&str; 16] = [
    ".......OO.......",
    "......OOOO......",
    "......OOOO......",
    "...O..OOOO..O...",
    "..OOO.OOOO.OOO..",
    "..OOOOOOOOOOOO..",
    "..OOOOOOOOOOOO..",
    "...OOOOOOOOOO...",
    "...OOOOOOOOOO...",
    "..OOOOOOOOOOOO..",
    "..OOOOOOOOOOOO..",
    "..OOO.OOOO.OOO..",
    "...O..OOOO..O...",
    "......OOOO......",
    "......OOOO......",
    ".......OO.......",
];

static PAL_CLOUD: [Rgb; 3] = [BLACK, LGREY, WHITE];
static CLOUD_ROWS: [&str; 16] = [
    "................",
    "................",
    ".....11.........",
    "...1112111......",
    "..112222211.....",
    ".11222222211....",
    ".112222222211...",
    ".112222222211...",
    "..1122222211....",
    "...11122111.....",
    ".....1111.......",
    "................",
    "................",
    "................",
    "................",
    "................",
];

static PAL_RAIN: [Rgb; 4] = [BLACK, LGREY, WHITE, BLUE];
static RAIN_ROWS: [&str; 16] = [
    "................",
    "................",
    ".....11.........",
    "...1112111......",
    "..112222211.....",
    ".11222222211....",
    ".112222222211...",
    ".112222222211...",
    "..1122222211....",
    "...11122111.....",
    "..3..3..3..3....",
    "...3..3..3......",
    "....3.....3.....",
    "...3..3..3......",
    "................",
    "................",
];

static PAL_SNOW: [Rgb; 4] = [BLACK, LGREY, WHITE, CYAN];
static SNOW_ROWS: [&str; 16] = [
    "................",
    "................",
    ".....11.........",
    "...1112111......",
    "..112222211.....",
    ".11222222211....",
    ".112222222211...",
    ".112222222211...",
    "..1122222211....",
    "...11122111.....",
    "..3..3..3..3....",
    "...3..3..3......",
    "..3..3..3..3....",
    "...3..3..3......",
    "................",
    "................",
];

// Bolt is yellow; its lower rows get darkened towards orange after decoding.
static PAL_THUNDER: [Rgb; 5] = [BLACK, LGREY, WHITE, YELLOW, ORANGE];
static THUNDER_ROWS: [&str; 16] = [
    "................",
    "................",
    ".....11.........",
    "...1112111......",
    "..112222211.....",
    ".11222222211....",
    ".112222222211...",
    ".112222222211...",
    "..1122222211....",
    "...11122111.....",
    "...33...........",
    "..3333..........",
    "...3333.........",
    "....44..........",
    "................",
    "................",
];

static PAL_UNKNOWN: [Rgb; 3] = [BLACK, PURPLE, WHITE];
static UNKNOWN_ROWS: [&str; 16] = [
    "................",
    "..11111.........",
    ".11...11........",
    ".11...11........",
    ".....111........",
    "....11..........",
    "...11...........",
    "...11...........",
    "...11...........",
    "................",
    "...11...........",
    "...11...........",
    "................",
    "................",
    "................",
    "................",
];

static PAL_PLAY: [Rgb; 2] = [BLACK, GREEN];
static PLAY_ROWS: [&str; 16] = [
    "................",
    "................",
    "...1............",
    "...11...........",
    "...111..........",
    "...1111.........",
    "...11111........",
    "...111111.......",
    "...11111........",
    "...1111.........",
    "...111..........",
    "...11...........",
    "...1............",
    "................",
    "................",
    "................",
];

static PAL_PAUSE: [Rgb; 2] = [BLACK, CYAN];
static PAUSE_ROWS: [&str; 16] = [
    "................",
    "................",
    "..11....11......",
    "..11....11......",
    "..11....11......",
    "..11....11......",
    "..11....11......",
    "..11....11......",
    "..11....11......",
    "..11....11......",
    "..11....11......",
    "..11....11......",
    "................",
    "................",
    "................",
    "................",
];

/// Every built-in icon.
pub static DEFINITIONS: [EncodedIcon; 8] = [
    EncodedIcon {
        name: "clear",
        rows: &SUN_ROWS,
        palette: &PAL_CLEAR,
        legend: ".O",
    },
    EncodedIcon {
        name: "cloudy",
        rows: &CLOUD_ROWS,
        palette: &PAL_CLOUD,
        legend: ".12",
    },
    EncodedIcon {
        name: "rain",
        rows: &RAIN_ROWS,
        palette: &PAL_RAIN,
        legend: ".123",
    },
    EncodedIcon {
        name: "snow",
        rows: &SNOW_ROWS,
        palette: &PAL_SNOW,
        legend: ".123",
    },
    EncodedIcon {
        name: "thunder",
        rows: &THUNDER_ROWS,
        palette: &PAL_THUNDER,
        legend: ".1234",
    },
    EncodedIcon {
        name: "unknown",
        rows: &UNKNOWN_ROWS,
        palette: &PAL_UNKNOWN,
        legend: ".12",
    },
    EncodedIcon {
        name: "play",
        rows: &PLAY_ROWS,
        palette: &PAL_PLAY,
        legend: ".1",
    },
    EncodedIcon {
        name: "pause",
        rows: &PAUSE_ROWS,
        palette: &PAL_PAUSE,
        legend: ".1",
    },
];

/// `(alias, target)`: the alias shares the target's decoded buffer.
pub static ALIASES: [(&str, &str); 1] = [("sunny", "clear")];
