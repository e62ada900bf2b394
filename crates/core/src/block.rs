//! Block module - orientation and rolling state machine
//!
//! The block is either `Idle` (accepts a command) or rolling (drops commands).
//! A command looks up the next footprint in a fixed transition table, derives
//! the pivot edge from the old footprint, and starts a scripted roll. The roll
//! advances a fixed number of degrees per tick; the tick it reaches the target
//! angle is the single commit point where the new footprint becomes
//! authoritative and the rotation is discarded.
//!
//! Footprints are stored as `(orientation, primary)` only. The secondary cell
//! is always derived, so it can never be updated independently.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::geometry::Vec3;
use crate::types::{
    Command, CommandOutcome, Coord, Orientation, DEATH_Y, FALL_STEP, ROLL_SPEED_DEG,
    ROLL_TARGET_DEG,
};

/// The one or two cells a block occupies.
///
/// For lying blocks `primary` is the lower-index cell: smallest column for
/// `LyingAlongX`, smallest row for `LyingAlongZ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Footprint {
    pub orientation: Orientation,
    pub primary: Coord,
}

/// One entry of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: Orientation,
    /// Signed shift applied to the primary cell.
    pub delta: (i32, i32),
}

const fn tr(next: Orientation, dc: i32, dr: i32) -> Transition {
    Transition {
        next,
        delta: (dc, dr),
    }
}

/// Rows: current orientation. Columns: Left, Right, Up, Down.
const TRANSITIONS: [[Transition; 4]; 3] = {
    use Orientation::*;
    [
        // Standing tips onto its side, landing one or two cells away.
        [
            tr(LyingAlongX, -2, 0),
            tr(LyingAlongX, 1, 0),
            tr(LyingAlongZ, 0, -2),
            tr(LyingAlongZ, 0, 1),
        ],
        // Lying along X: stands up on Left/Right, slides on Up/Down.
        [
            tr(Standing, -1, 0),
            tr(Standing, 2, 0),
            tr(LyingAlongX, 0, -1),
            tr(LyingAlongX, 0, 1),
        ],
        // Lying along Z: slides on Left/Right, stands up on Up/Down.
        [
            tr(LyingAlongZ, -1, 0),
            tr(LyingAlongZ, 1, 0),
            tr(Standing, 0, -1),
            tr(Standing, 0, 2),
        ],
    ]
};

fn orientation_index(o: Orientation) -> usize {
    match o {
        Orientation::Standing => 0,
        Orientation::LyingAlongX => 1,
        Orientation::LyingAlongZ => 2,
    }
}

fn command_index(cmd: Command) -> usize {
    match cmd {
        Command::Left => 0,
        Command::Right => 1,
        Command::Up => 2,
        Command::Down => 3,
    }
}

/// Look up the transition for `orientation` under `cmd`.
pub fn transition(orientation: Orientation, cmd: Command) -> Transition {
    TRANSITIONS[orientation_index(orientation)][command_index(cmd)]
}

impl Footprint {
    pub fn standing(at: Coord) -> Self {
        Self {
            orientation: Orientation::Standing,
            primary: at,
        }
    }

    pub fn secondary(&self) -> Option<Coord> {
        self.orientation
            .secondary_offset()
            .map(|(dc, dr)| self.primary.offset(dc, dr))
    }

    pub fn cells(&self) -> ArrayVec<Coord, 2> {
        let mut cells = ArrayVec::new();
        cells.push(self.primary);
        if let Some(second) = self.secondary() {
            cells.push(second);
        }
        cells
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.primary == at || self.secondary() == Some(at)
    }

    /// The footprint after rolling once in direction `cmd`.
    pub fn after(&self, cmd: Command) -> Footprint {
        let t = transition(self.orientation, cmd);
        Footprint {
            orientation: t.next,
            primary: self.primary.offset(t.delta.0, t.delta.1),
        }
    }

    /// World-space extents `(min_x, max_x, min_z, max_z)` of the base.
    fn extents(&self) -> (f32, f32, f32, f32) {
        let (dc, dr) = self.orientation.secondary_offset().unwrap_or((0, 0));
        let min_x = self.primary.col as f32;
        let min_z = self.primary.row as f32;
        (min_x, min_x + 1.0 + dc as f32, min_z, min_z + 1.0 + dr as f32)
    }

    /// Resting centre of a block with this footprint.
    pub fn center(&self) -> Vec3 {
        let (min_x, max_x, min_z, max_z) = self.extents();
        let height = self.orientation.scale()[1] as f32;
        Vec3::new((min_x + max_x) / 2.0, height / 2.0, (min_z + max_z) / 2.0)
    }
}

/// The bottom edge of `footprint` the block tips over when rolled by `cmd`.
///
/// Returned as the midpoint of that edge on the floor plane.
pub fn pivot_point(footprint: &Footprint, cmd: Command) -> Vec3 {
    let (min_x, max_x, min_z, max_z) = footprint.extents();
    let mid_x = (min_x + max_x) / 2.0;
    let mid_z = (min_z + max_z) / 2.0;
    match cmd {
        Command::Left => Vec3::new(min_x, 0.0, mid_z),
        Command::Right => Vec3::new(max_x, 0.0, mid_z),
        Command::Up => Vec3::new(mid_x, 0.0, min_z),
        Command::Down => Vec3::new(mid_x, 0.0, max_z),
    }
}

/// Horizontal axis perpendicular to the roll direction.
pub fn roll_axis(cmd: Command) -> Vec3 {
    match cmd {
        Command::Left | Command::Right => Vec3::Z,
        Command::Up | Command::Down => Vec3::X,
    }
}

/// Signed target angle so the top always tips towards `cmd`.
pub fn target_angle(cmd: Command) -> i32 {
    match cmd {
        Command::Left | Command::Down => ROLL_TARGET_DEG,
        Command::Right | Command::Up => -ROLL_TARGET_DEG,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RollDirection {
    None,
    /// Positive target angle.
    Forward,
    /// Negative target angle.
    Backward,
}

/// Rolling animation state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnimState {
    pub direction: RollDirection,
    pub axis: Vec3,
    pub pivot: Vec3,
    pub current_angle: i32,
    pub target_angle: i32,
    pub angular_speed: i32,
}

impl AnimState {
    pub const IDLE: AnimState = AnimState {
        direction: RollDirection::None,
        axis: Vec3::ZERO,
        pivot: Vec3::ZERO,
        current_angle: 0,
        target_angle: 0,
        angular_speed: 0,
    };

    pub fn is_rolling(&self) -> bool {
        self.direction != RollDirection::None
    }
}

/// Mid-roll rotation for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RollPose {
    pub axis: Vec3,
    pub pivot: Vec3,
    pub angle_deg: i32,
}

/// World-space pose of the block as the renderer should draw it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlockPose {
    pub footprint: Footprint,
    pub secondary: Option<Coord>,
    /// Committed translation (no rotation baked in).
    pub center: Vec3,
    /// Present only while rolling.
    pub roll: Option<RollPose>,
    pub scale: [u8; 3],
    pub falling: bool,
}

impl BlockPose {
    /// Centre including the in-flight roll, if any.
    pub fn visual_center(&self) -> Vec3 {
        match self.roll {
            Some(r) => self
                .center
                .rotated_about(r.pivot, r.axis, r.angle_deg as f32),
            None => self.center,
        }
    }
}

/// The player's block.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    footprint: Footprint,
    /// Footprint the current roll commits to.
    pending: Option<Footprint>,
    /// Committed world translation. Only falling moves it between commits.
    center: Vec3,
    anim: AnimState,
    falling: bool,
    /// Set by a teleport, cleared when the next roll begins.
    teleport_guard: bool,
}

impl Block {
    /// A standing block at `spawn`.
    pub fn new(spawn: Coord) -> Self {
        let footprint = Footprint::standing(spawn);
        Self {
            footprint,
            pending: None,
            center: footprint.center(),
            anim: AnimState::IDLE,
            falling: false,
            teleport_guard: false,
        }
    }

    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    pub fn orientation(&self) -> Orientation {
        self.footprint.orientation
    }

    pub fn primary(&self) -> Coord {
        self.footprint.primary
    }

    pub fn secondary(&self) -> Option<Coord> {
        self.footprint.secondary()
    }

    pub fn cells(&self) -> ArrayVec<Coord, 2> {
        self.footprint.cells()
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn anim(&self) -> &AnimState {
        &self.anim
    }

    pub fn is_rolling(&self) -> bool {
        self.anim.is_rolling()
    }

    pub fn is_falling(&self) -> bool {
        self.falling
    }

    /// Idle blocks accept commands.
    pub fn is_idle(&self) -> bool {
        !self.is_rolling() && !self.falling
    }

    pub fn teleport_guard(&self) -> bool {
        self.teleport_guard
    }

    pub fn scale(&self) -> [u8; 3] {
        self.footprint.orientation.scale()
    }

    pub fn pose(&self) -> BlockPose {
        let roll = self.is_rolling().then_some(RollPose {
            axis: self.anim.axis,
            pivot: self.anim.pivot,
            angle_deg: self.anim.current_angle,
        });
        BlockPose {
            footprint: self.footprint,
            secondary: self.footprint.secondary(),
            center: self.center,
            roll,
            scale: self.scale(),
            falling: self.falling,
        }
    }

    /// Start rolling in direction `cmd`.
    ///
    /// Returns `Busy` without touching any state if a roll or fall is in flight.
    pub fn begin_move(&mut self, cmd: Command) -> CommandOutcome {
        if !self.is_idle() {
            return CommandOutcome::Busy;
        }

        let target = target_angle(cmd);
        self.anim = AnimState {
            direction: if target > 0 {
                RollDirection::Forward
            } else {
                RollDirection::Backward
            },
            axis: roll_axis(cmd),
            pivot: pivot_point(&self.footprint, cmd),
            current_angle: 0,
            target_angle: target,
            angular_speed: ROLL_SPEED_DEG,
        };
        self.pending = Some(self.footprint.after(cmd));
        self.teleport_guard = false;
        CommandOutcome::Accepted
    }

    /// Advance the roll by one fixed step.
    ///
    /// Returns `true` on the tick the roll commits. The step is per tick, not
    /// scaled by elapsed time.
    pub fn advance(&mut self) -> bool {
        if !self.is_rolling() {
            return false;
        }

        let step = self.anim.angular_speed * self.anim.target_angle.signum();
        let next = self.anim.current_angle + step;
        self.anim.current_angle = if next.abs() >= self.anim.target_angle.abs() {
            self.anim.target_angle
        } else {
            next
        };

        if self.anim.current_angle != self.anim.target_angle {
            return false;
        }

        if let Some(next) = self.pending.take() {
            self.footprint = next;
            self.center = next.center();
        }
        self.anim = AnimState::IDLE;
        true
    }

    pub fn start_falling(&mut self) {
        self.falling = true;
    }

    /// Drop one step. Returns `true` once the block has fallen past `DEATH_Y`.
    pub fn fall_step(&mut self) -> bool {
        if self.center.y > DEATH_Y {
            self.center.y -= FALL_STEP;
            false
        } else {
            true
        }
    }

    /// Jump to the paired teleporter pad.
    ///
    /// The block keeps its orientation and is shifted by the fixed offset
    /// between the pads.
    pub fn teleport_to(&mut self, dest: Coord) {
        let (dc, dr) = dest.delta_from(self.footprint.primary);
        self.footprint.primary = dest;
        self.center = self.center + Vec3::new(dc as f32, 0.0, dr as f32);
        self.teleport_guard = true;
    }

    /// Put the block back upright at `spawn`, clearing all per-life flags.
    pub fn respawn(&mut self, spawn: Coord) {
        *self = Block::new(spawn);
    }
}
