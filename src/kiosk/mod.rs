// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0

//! Kiosk shell: the frame protocol and the state machine that drives it.

pub mod controller;
pub mod messages;

pub use controller::{KioskController, Outbound, View};
pub use messages::{FrameMessage, ProtocolError};
