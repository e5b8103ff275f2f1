/// A compass direction on the board, usable in const contexts through the
/// associated deltas.
pub trait Direction {
    const DX: i8;
    const DY: i8;
}

pub struct Up;
pub struct Down;
pub struct Right;
pub struct Left;

pub struct UpRight;
pub struct UpLeft;
pub struct DownRight;
pub struct DownLeft;

/*----------------------------------------------------------------*/

impl Direction for Up {
    const DX: i8 = 0;
    const DY: i8 = 1;
}

impl Direction for Down {
    const DX: i8 = 0;
    const DY: i8 = -1;
}

impl Direction for Right {
    const DX: i8 = 1;
    const DY: i8 = 0;
}

impl Direction for Left {
    const DX: i8 = -1;
    const DY: i8 = 0;
}

impl Direction for UpRight {
    const DX: i8 = 1;
    const DY: i8 = 1;
}

impl Direction for UpLeft {
    const DX: i8 = -1;
    const DY: i8 = 1;
}

impl Direction for DownRight {
    const DX: i8 = 1;
    const DY: i8 = -1;
}

impl Direction for DownLeft {
    const DX: i8 = -1;
    const DY: i8 = -1;
}
