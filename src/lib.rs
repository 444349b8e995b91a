//!
//! ## Design
//!
//! * input for a text adventure VM on the dumbest terminal there is:
//!   everything arrives a whole line at a time, with no raw keys and no
//!   interrupts
//! * timed input done after the fact; measure how long the line took,
//!   compare with the timeout, and bank any overrun so later timeouts
//!   come out the same as if the user had typed slowly
//! * keys the terminal can't send (arrows, function keys, hotkeys) are
//!   typed as escapes; whole lines starting with the marker are commands
//!   to the front end
//! * abstract the screen and the console so tests can script both, and
//!   abstract the clock so they don't have to wait
//!
//! Model
//!
//! Session(console, screen, clock, config)
//!  |-- settings: speed factor, more prompts
//!  |-- time budget (bank of tenths the user is ahead)
//!  |-- read-ahead: rest of a key line, or rest of a line after a hotkey
//!  `-- read_raw_line
//!       |-- show screen, prompt
//!       |-- read console line (bounded)
//!       |-- command? run it, go round again
//!       |   // \t and \w only do anything while a timeout is running
//!       `-- data: translate escapes, charge elapsed time, return
//!
//! read_key / read_line sit on top and hand out one key or one line from
//! the read-ahead before going back to the console. read_file_name and
//! more_prompt use the same loop for their own prompts.
pub mod budget;
pub mod clock;
pub mod command;
pub mod decode;
pub mod display;
pub mod error;
pub mod escape;
pub mod filename;
pub mod header;
pub mod input;
pub mod readahead;
pub mod session;
pub mod zchar;
