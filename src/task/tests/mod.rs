//! Unit tests for the task workflow.

mod support;
