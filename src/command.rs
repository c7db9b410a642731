//! SPI Commands for the Waveshare 2.13" (B) E-Ink Display

/// Command bytes understood by the panel controller.
///
/// Each command is sent with the data/command pin low; any payload bytes
/// follow with the pin high.
#[derive(Copy, Clone)]
pub(crate) enum Command {
    PanelSetting = 0x00,

    PowerOff = 0x02,
    PowerOn = 0x04,
    DeepSleep = 0x07,
    DataStartTransmission1 = 0x10,
    DataEntryModeSetting = 0x11,
    DisplayRefresh = 0x12,
    DataStartTransmission2 = 0x13,

    VcomAndDataIntervalSetting = 0x50,
    ResolutionSetting = 0x61,
}

impl Command {
    /// Returns the address of the command
    pub(crate) fn address(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::Command;

    #[test]
    fn command_addresses() {
        assert_eq!(Command::PanelSetting.address(), 0x00);
        assert_eq!(Command::PowerOff.address(), 0x02);
        assert_eq!(Command::PowerOn.address(), 0x04);
        assert_eq!(Command::DeepSleep.address(), 0x07);
        assert_eq!(Command::DataStartTransmission1.address(), 0x10);
        assert_eq!(Command::DataEntryModeSetting.address(), 0x11);
        assert_eq!(Command::DisplayRefresh.address(), 0x12);
        assert_eq!(Command::DataStartTransmission2.address(), 0x13);
        assert_eq!(Command::VcomAndDataIntervalSetting.address(), 0x50);
        assert_eq!(Command::ResolutionSetting.address(), 0x61);
    }
}
