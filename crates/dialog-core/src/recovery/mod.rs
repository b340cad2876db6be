//! Dialog recovery and failure handling
//!
//! This module handles dialog recovery from network failures.

pub mod recovery_manager;
pub mod failure_detection;
pub mod recovery_strategies;

// TODO: Re-export main types 