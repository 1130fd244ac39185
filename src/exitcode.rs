//! Standard exit codes (BSD sysexits.h compatible)

/// Command line usage error (unknown command, bad flags)
pub const USAGE: i32 = 64;

/// Data format error (malformed audio or config data)
pub const DATAERR: i32 = 65;

/// Cannot open input
pub const NOINPUT: i32 = 66;

/// Can't create output file
pub const CANTCREAT: i32 = 73;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
