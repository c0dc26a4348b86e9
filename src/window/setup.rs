//! Options fixed when a window is opened.

/// The possible number of samples for multisample anti-aliasing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumSamples {
    /// Multisampling disabled.
    #[default]
    Zero = 0,
    /// One sample
    One = 1,
    /// Two samples
    Two = 2,
    /// Four samples
    Four = 4,
    /// Eight samples
    Eight = 8,
    /// Sixteen samples
    Sixteen = 16,
}

impl NumSamples {
    /// The variant for `i` samples, if the count is one wgpu can support.
    pub fn from_u32(i: u32) -> Option<NumSamples> {
        match i {
            0 => Some(NumSamples::Zero),
            1 => Some(NumSamples::One),
            2 => Some(NumSamples::Two),
            4 => Some(NumSamples::Four),
            8 => Some(NumSamples::Eight),
            16 => Some(NumSamples::Sixteen),
            _ => None,
        }
    }
}

/// How the window and its surface are set up.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanvasSetup {
    /// Is vsync enabled?
    pub vsync: bool,
    /// Number of AA samples.
    pub samples: NumSamples,
    /// Can the user resize the window?
    pub resizable: bool,
    /// Is the window placed at the center of the primary monitor?
    pub centered: bool,
}

impl Default for CanvasSetup {
    fn default() -> Self {
        CanvasSetup {
            vsync: true,
            samples: NumSamples::Zero,
            resizable: false,
            centered: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_power_of_two_sample_counts_are_accepted() {
        assert_eq!(NumSamples::from_u32(0), Some(NumSamples::Zero));
        assert_eq!(NumSamples::from_u32(4), Some(NumSamples::Four));
        assert_eq!(NumSamples::from_u32(16), Some(NumSamples::Sixteen));
        assert_eq!(NumSamples::from_u32(3), None);
        assert_eq!(NumSamples::from_u32(32), None);
    }

    #[test]
    fn default_setup_is_a_fixed_centered_vsynced_window() {
        let setup = CanvasSetup::default();
        assert!(setup.vsync);
        assert!(!setup.resizable);
        assert!(setup.centered);
        assert_eq!(setup.samples, NumSamples::Zero);
    }
}
