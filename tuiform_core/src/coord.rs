//! Terminal coordinate system.
//!
//! The top-left of the terminal is the `(0,0)` position, the bottom-right is
//! the `(width,height)` position, where `width` and `height` is the size of
//! the terminal. The Y-axis grows downward, which is compatible with the
//! coordinates used in the
//! [crossterm](https://docs.rs/crossterm/latest/crossterm/index.html) library.
//!
//! Widget geometry is kept in [`isize`] while layout runs (sizes can go
//! negative in intermediate tie/centering arithmetic), and only converted to
//! [`u16`] when it reaches the terminal device.

use geo::Point;
use geo::Rect;

// Positions {

/// Position that uses [`isize`] as internal type.
pub type IPos = Point<isize>;

/// Position that uses [`u16`] as internal type. NOTE: This is especially for terminal devices.
pub type U16Pos = Point<u16>;

// Positions }

// Rectangles {

/// Rectangle that uses [`isize`] as internal type.
pub type IRect = Rect<isize>;

/// Rectangle that uses [`u16`] as internal type. NOTE: This is especially for terminal devices.
pub type U16Rect = Rect<u16>;

// Rectangles }

// Size {

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
/// Generic rectangle size.
pub struct Size<
  T: Copy
    + PartialOrd
    + Ord
    + PartialEq
    + Eq
    + std::fmt::Debug
    + num_traits::Num
    + num_traits::NumCast,
> {
  width: T,
  height: T,
}

impl<T> Size<T>
where
  T: Copy
    + PartialOrd
    + Ord
    + PartialEq
    + Eq
    + std::fmt::Debug
    + num_traits::Num
    + num_traits::NumCast,
{
  /// Make size from width(columns) and height(rows).
  pub fn new(width: T, height: T) -> Self {
    Size { width, height }
  }

  /// Get width(columns).
  pub fn width(&self) -> T {
    self.width
  }

  /// Get height(rows).
  pub fn height(&self) -> T {
    self.height
  }
}

impl<T> From<Rect<T>> for Size<T>
where
  T: Copy
    + PartialOrd
    + Ord
    + PartialEq
    + Eq
    + std::fmt::Debug
    + num_traits::Num
    + num_traits::NumCast,
{
  /// Make size from [`Rect`].
  fn from(rect: Rect<T>) -> Size<T> {
    Size::new(rect.width(), rect.height())
  }
}

/// Size that uses [`isize`] as internal type.
pub type ISize = Size<isize>;

/// Size that uses [`u16`] as internal type. NOTE: This is especially for terminal devices.
pub type U16Size = Size<u16>;

// Size }

/// Make a `geo::Rect<isize>` from `(x, y)` origin and `(w, h)` extent.
#[macro_export]
macro_rules! irect {
  ($x:expr,$y:expr,$w:expr,$h:expr) => {
    geo::Rect::new(
      geo::point!(x: $x as isize, y: $y as isize),
      geo::point!(x: ($x + $w) as isize, y: ($y + $h) as isize),
    )
  };
}
