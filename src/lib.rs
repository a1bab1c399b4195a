//! Shift Salary Calculation Engine
//!
//! This crate computes shift-based salaries for factory work schedules:
//! it parses clock-in/clock-out times, matches them against the fixed
//! shift catalog, deducts overlapping break minutes and splits the paid
//! time into regular, overtime and night-overtime pay. Calculations are
//! persisted per user in flat JSON files, with analytics, export, goal
//! tracking, calendar and reminder features layered over the same store
//! and the whole surface exposed through an HTTP API.

#![warn(missing_docs)]

pub mod analytics;
pub mod api;
pub mod calculation;
pub mod calendar;
pub mod config;
pub mod error;
pub mod export;
pub mod goals;
pub mod models;
pub mod reminders;
pub mod storage;
