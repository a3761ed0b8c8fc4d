//! 2D scanline rasterizer
//!
//! Lines and triangles drawn by linear interpolation, written straight to a
//! `PixelSink`. Independent of the ray tracer.

use crate::canvas::PixelSink;
use crate::color::Color;

/// Integer point in canvas space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Values of the dependent variable `d` for every integer `i` in `i0..=i1`
///
/// Returns just `d0` when `i0 == i1`.
pub fn interpolate(i0: i32, d0: i32, i1: i32, d1: i32) -> Vec<f32> {
    if i0 == i1 {
        return vec![d0 as f32];
    }

    let a = (d1 - d0) as f32 / (i1 - i0) as f32;
    let mut d = d0 as f32;
    let mut values = Vec::with_capacity((i1 - i0 + 1).max(0) as usize);
    for _ in i0..=i1 {
        values.push(d);
        d += a;
    }
    values
}

pub fn draw_line<S: PixelSink + ?Sized>(sink: &mut S, p0: Point, p1: Point, color: Color) {
    let (mut p0, mut p1) = (p0, p1);
    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;

    if dx.abs() > dy.abs() {
        // Horizontal-ish: walk x left to right
        if dx < 0 {
            std::mem::swap(&mut p0, &mut p1);
        }
        let ys = interpolate(p0.x, p0.y, p1.x, p1.y);
        for x in p0.x..=p1.x {
            sink.put_pixel(x, ys[(x - p0.x) as usize] as i32, color);
        }
    } else {
        // Vertical-ish: walk y bottom to top
        if dy < 0 {
            std::mem::swap(&mut p0, &mut p1);
        }
        let xs = interpolate(p0.y, p0.x, p1.y, p1.x);
        for y in p0.y..=p1.y {
            sink.put_pixel(xs[(y - p0.y) as usize] as i32, y, color);
        }
    }
}

pub fn draw_wireframe_triangle<S: PixelSink + ?Sized>(
    sink: &mut S,
    p0: Point,
    p1: Point,
    p2: Point,
    color: Color,
) {
    draw_line(sink, p0, p1, color);
    draw_line(sink, p1, p2, color);
    draw_line(sink, p2, p0, color);
}

pub fn draw_filled_triangle<S: PixelSink + ?Sized>(
    sink: &mut S,
    p0: Point,
    p1: Point,
    p2: Point,
    color: Color,
) {
    // Sort bottom to top
    let (mut p0, mut p1, mut p2) = (p0, p1, p2);
    if p1.y < p0.y {
        std::mem::swap(&mut p0, &mut p1);
    }
    if p2.y < p0.y {
        std::mem::swap(&mut p0, &mut p2);
    }
    if p2.y < p1.y {
        std::mem::swap(&mut p1, &mut p2);
    }

    // x along each edge, one entry per scanline
    let mut x01 = interpolate(p0.y, p0.x, p1.y, p1.x);
    let x12 = interpolate(p1.y, p1.x, p2.y, p2.x);
    let x02 = interpolate(p0.y, p0.x, p2.y, p2.x);

    // The short sides share p1; drop the duplicate before joining them
    x01.pop();
    let x012: Vec<f32> = x01.into_iter().chain(x12).collect();

    let m = x02.len() / 2;
    let (x_left, x_right) = if x02[m] < x012[m] { (&x02, &x012) } else { (&x012, &x02) };

    for y in p0.y..=p2.y {
        let i = (y - p0.y) as usize;
        for x in (x_left[i] as i32)..=(x_right[i] as i32) {
            sink.put_pixel(x, y, color);
        }
    }
}

/// A green triangle with a black outline
pub fn draw_demo<S: PixelSink + ?Sized>(sink: &mut S) {
    let p0 = Point::new(-200, -250);
    let p1 = Point::new(200, 50);
    let p2 = Point::new(20, 250);

    draw_filled_triangle(sink, p0, p1, p2, Color::new(0, 255, 0));
    draw_wireframe_triangle(sink, p0, p1, p2, Color::BLACK);
}
