// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0

//! Wayfinder: headless core for a touchscreen kiosk wayfinding app

fn main() -> anyhow::Result<()> {
    wayfinder::run()
}
