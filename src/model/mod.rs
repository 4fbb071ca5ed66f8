//! Wire models for the admin API. The server owns every identifier; the
//! client never fabricates ids, it only echoes them back.

pub mod entity;
