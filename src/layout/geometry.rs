// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt::Write as _;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Moves `distance` along the unit vector `dir`.
    pub fn along(self, dir: Vector, distance: f64) -> Self {
        self.offset(dir.x * distance, dir.y * distance)
    }

    /// Linear interpolation; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }
}

/// A direction; unit length when produced by [`unit`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    /// Rotated a quarter turn counter-clockwise on screen (y grows downward), i.e. the left-hand
    /// side of travel.
    pub fn left_normal(self) -> Self {
        Self { x: self.y, y: -self.x }
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self { x: self.x * factor, y: self.y * factor }
    }

    pub fn negated(self) -> Self {
        self.scaled(-1.0)
    }
}

/// Unit vector from `from` to `to`; `None` when the points coincide.
pub fn unit(from: Point, to: Point) -> Option<Vector> {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1e-6 {
        return None;
    }
    Some(Vector { x: dx / len, y: dy / len })
}

/// Quadratic Bezier segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuadCurve {
    pub start: Point,
    pub control: Point,
    pub end: Point,
}

impl QuadCurve {
    /// The curve that passes through `through` at its parameter midpoint.
    pub fn through(start: Point, through: Point, end: Point) -> Self {
        let chord_mid = start.midpoint(end);
        let control = Point::new(2.0 * through.x - chord_mid.x, 2.0 * through.y - chord_mid.y);
        Self { start, control, end }
    }

    pub fn point_at(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        Point::new(
            mt * mt * self.start.x + 2.0 * mt * t * self.control.x + t * t * self.end.x,
            mt * mt * self.start.y + 2.0 * mt * t * self.control.y + t * t * self.end.y,
        )
    }

    pub fn points(&self) -> [Point; 3] {
        [self.start, self.control, self.end]
    }

    /// SVG path data (`M x y Q cx cy x y`).
    pub fn svg_path_data(&self) -> String {
        let mut out = String::with_capacity(48);
        let _ = write!(
            out,
            "M{} {} Q{} {} {} {}",
            svg_num(self.start.x),
            svg_num(self.start.y),
            svg_num(self.control.x),
            svg_num(self.control.y),
            svg_num(self.end.x),
            svg_num(self.end.y)
        );
        out
    }
}

/// Filled triangle at the end of a directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arrowhead {
    pub tip: Point,
    pub left: Point,
    pub right: Point,
}

impl Arrowhead {
    /// Triangle with its tip at `tip`, pointing along `dir`, `length` deep and `length` wide.
    pub fn new(tip: Point, dir: Vector, length: f64) -> Self {
        let back = tip.along(dir, -length);
        let normal = dir.left_normal().scaled(length * 0.5);
        Self {
            tip,
            left: back.offset(normal.x, normal.y),
            right: back.offset(-normal.x, -normal.y),
        }
    }

    pub fn points(&self) -> [Point; 3] {
        [self.tip, self.left, self.right]
    }
}

/// Axis-aligned bounding box accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    pub(crate) fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub(crate) fn include_point(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub(crate) fn include_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.include_point(Point::new(x, y));
        self.include_point(Point::new(x + width, y + height));
    }

    pub(crate) fn include_circle(&mut self, center: Point, radius: f64) {
        self.include_rect(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0);
    }

    pub(crate) fn min_x(&self) -> f64 {
        self.min_x
    }

    pub(crate) fn min_y(&self) -> f64 {
        self.min_y
    }

    pub(crate) fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub(crate) fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

pub(crate) fn svg_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    rounded.to_string()
}
