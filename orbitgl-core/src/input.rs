use std::f32::consts::PI;

/// Default orbit step per key press, in radians.
pub const DEFAULT_ORBIT_STEP: f32 = PI / 60.0;

/// Camera orbit commands bound to the W/A/S/D keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitControl {
    /// `W`: decreases the elevation angle, lowering the eye.
    ElevationDown,
    /// `A`: increases the azimuth, moving the eye toward +x.
    AzimuthUp,
    /// `S`: increases the elevation angle, raising the eye.
    ElevationUp,
    /// `D`: decreases the azimuth, moving the eye toward -x.
    AzimuthDown,
}

impl OrbitControl {
    /// Maps a DOM `keyCode` to an orbit command.
    ///
    /// Letter key codes are upper-case ASCII regardless of shift state; the
    /// comparison is case-sensitive, so lower-case code points are ignored.
    pub fn from_key_code(key_code: u32) -> Option<Self> {
        char::from_u32(key_code).and_then(Self::from_char)
    }

    /// Maps a key name such as `"W"`; anything longer than one character is
    /// not an orbit key.
    pub fn from_key(key: &str) -> Option<Self> {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'W' => Some(OrbitControl::ElevationDown),
            'A' => Some(OrbitControl::AzimuthUp),
            'S' => Some(OrbitControl::ElevationUp),
            'D' => Some(OrbitControl::AzimuthDown),
            _ => None,
        }
    }
}
