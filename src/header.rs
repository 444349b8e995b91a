use bitflags::bitflags;

bitflags! {
    /// what the interpreter tells the story it can do (header byte 1)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Config: u8 {
        const COLOUR = 0x01;
        const PICTURES = 0x02;
        const BOLDFACE = 0x04;
        const EMPHASIS = 0x08;
        const FIXED = 0x10;
        const SOUND = 0x20;
        const TIMED_INPUT = 0x80;
    }
}

bitflags! {
    /// what the story would like to use (header word 0x10)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Flags: u16 {
        const SCRIPTING = 0x0001;
        const FIXED_FONT = 0x0002;
        const REFRESH = 0x0004;
        const GRAPHICS = 0x0008;
        const UNDO = 0x0010;
        const MOUSE = 0x0020;
        const COLOUR = 0x0040;
        const SOUND = 0x0080;
        const MENU = 0x0100;
    }
}

/// The parts of a story file header that depend on the input side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoryHeader {
    pub version: u8,
    pub config: Config,
    pub flags: Flags,
}

impl StoryHeader {
    pub fn new(version: u8) -> Self {
        StoryHeader {
            version,
            ..Default::default()
        }
    }
}
