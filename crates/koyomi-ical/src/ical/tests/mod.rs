//! Behavior tests exercising components end to end.

mod enumeration;
