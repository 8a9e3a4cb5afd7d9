// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0

//! Parser for the SVG path `d` mini-language.
//!
//! Walks `M/m, L/l, H/h, V/v, C/c, Q/q` commands while maintaining a current
//! point, and records *destination* points only. Curve control points are
//! consumed but never recorded, so bounding boxes computed from the output
//! under-estimate strongly curved paths. That is the contract callers rely
//! on (marker placement uses room outlines, which are polygonal); do not
//! "fix" it here without migrating the stored coordinates.
//!
//! Unsupported commands (`A`, `S`, `T`, `Z`, ...) are skipped without error.

use kurbo::Point;

/// Parse a path `d` attribute into the list of visited destination points.
///
/// Returns `None` for input that contains no parseable commands or yields
/// no points, so callers can skip the element.
pub fn parse_path_points(d: &str) -> Option<Vec<Point>> {
    let mut cursor = Point::ZERO;
    let mut points = Vec::new();

    for (command, args) in split_commands(d) {
        walk_command(command, &args, &mut cursor, &mut points);
    }

    if points.is_empty() { None } else { Some(points) }
}

/// Split a `d` string into (command letter, numeric arguments) groups.
///
/// A command letter is any ASCII alphabetic except `e`/`E`, which belong to
/// exponent notation inside numbers.
fn split_commands(d: &str) -> Vec<(char, Vec<f64>)> {
    let mut commands = Vec::new();
    let mut current: Option<(char, String)> = None;

    for ch in d.chars() {
        if ch.is_ascii_alphabetic() && ch != 'e' && ch != 'E' {
            if let Some((cmd, args)) = current.take() {
                commands.push((cmd, parse_args(&args)));
            }
            current = Some((ch, String::new()));
        } else if let Some((_, args)) = current.as_mut() {
            args.push(ch);
        }
        // Leading junk before the first command letter is dropped.
    }

    if let Some((cmd, args)) = current {
        commands.push((cmd, parse_args(&args)));
    }
    commands
}

/// Split an argument string on commas/whitespace and parse each number.
/// Tokens that fail to parse are dropped.
fn parse_args(raw: &str) -> Vec<f64> {
    raw.split([',', ' ', '\t', '\n', '\r'])
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<f64>().ok())
        .collect()
}

/// Execute one command, pushing destination points and advancing the cursor.
///
/// Implicit repeats are honored by chunking the argument list; a trailing
/// partial chunk is dropped rather than producing a half-formed point.
fn walk_command(command: char, args: &[f64], cursor: &mut Point, points: &mut Vec<Point>) {
    fn visit(p: Point, cursor: &mut Point, points: &mut Vec<Point>) {
        *cursor = p;
        points.push(p);
    }

    match command {
        'M' | 'L' => {
            for pair in args.chunks_exact(2) {
                visit(Point::new(pair[0], pair[1]), cursor, points);
            }
        }
        'm' | 'l' => {
            for pair in args.chunks_exact(2) {
                visit(Point::new(cursor.x + pair[0], cursor.y + pair[1]), cursor, points);
            }
        }
        'H' => {
            for &x in args {
                visit(Point::new(x, cursor.y), cursor, points);
            }
        }
        'h' => {
            for &dx in args {
                visit(Point::new(cursor.x + dx, cursor.y), cursor, points);
            }
        }
        'V' => {
            for &y in args {
                visit(Point::new(cursor.x, y), cursor, points);
            }
        }
        'v' => {
            for &dy in args {
                visit(Point::new(cursor.x, cursor.y + dy), cursor, points);
            }
        }
        // Cubic: two control points consumed, endpoint recorded.
        'C' => {
            for group in args.chunks_exact(6) {
                visit(Point::new(group[4], group[5]), cursor, points);
            }
        }
        'c' => {
            for group in args.chunks_exact(6) {
                visit(Point::new(cursor.x + group[4], cursor.y + group[5]), cursor, points);
            }
        }
        // Quadratic: one control point consumed, endpoint recorded.
        'Q' => {
            for group in args.chunks_exact(4) {
                visit(Point::new(group[2], group[3]), cursor, points);
            }
        }
        'q' => {
            for group in args.chunks_exact(4) {
                visit(Point::new(cursor.x + group[2], cursor.y + group[3]), cursor, points);
            }
        }
        _ => {}
    }
}
