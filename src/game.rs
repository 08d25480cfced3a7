use crate::piece::PieceKind;
use crate::store::HighScoreStore;
use rand::prelude::*;

pub const COLS: i32 = 10;
pub const ROWS: i32 = 20;

// host loop iterations between automatic drops (one iteration ~10ms)
const TICKS_PER_DROP: u32 = 50;

const POINTS_PER_LINE: u32 = 10;

/// The active falling piece: a kind, a quarter-turn count and the board
/// position of its bounding box origin.
#[derive(Debug, Clone, Copy)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    pub fn spawn(rng: &mut ThreadRng) -> Self {
        let kind = PieceKind::random(rng);
        let (width, _) = kind.dim(0);
        Piece {
            kind,
            rotation: 0,
            x: COLS / 2 - width / 2,
            y: 0,
        }
    }

    /// Occupied cells in board coordinates.
    pub fn cells(&self) -> [(i32, i32); 4] {
        let mut cells = self.kind.cells(self.rotation);
        for (x, y) in &mut cells {
            *x += self.x;
            *y += self.y;
        }
        cells
    }
}

pub struct Board {
    cells: [[u8; COLS as usize]; ROWS as usize],
}

impl Default for Board {
    fn default() -> Board {
        Board {
            cells: [[0; COLS as usize]; ROWS as usize],
        }
    }
}

impl Board {
    pub fn get(&self, x: i32, y: i32) -> u8 {
        self.cells[y as usize][x as usize]
    }

    fn set(&mut self, x: i32, y: i32, v: u8) {
        self.cells[y as usize][x as usize] = v;
    }

    /// Legal iff every occupied cell is inside the side/bottom bounds and
    /// lands on an empty board cell. Cells above row 0 are allowed and are
    /// never compared against the board.
    pub fn can_place(&self, piece: &Piece) -> bool {
        piece.cells().iter().all(|&(x, y)| {
            if x < 0 || x >= COLS || y >= ROWS {
                return false;
            }
            y < 0 || self.get(x, y) == 0
        })
    }

    fn is_filled(&self, row: i32) -> bool {
        self.cells[row as usize].iter().all(|&v| v != 0)
    }

    // drop the given row out and push an empty row in at the top
    fn wipe(&mut self, row: i32) {
        for i in (0..row as usize).rev() {
            self.cells[i + 1] = self.cells[i];
        }
        self.cells[0].fill(0);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    Paused,
    Over,
}

pub enum Command {
    Left,
    Right,
    SoftDrop,
    Rotate,
    HardDrop,
}

pub struct Game {
    pub board: Board,
    pub piece: Piece,
    pub phase: Phase,
    pub score: u32,
    pub high_score: u32,
    drop_counter: u32,
    store: HighScoreStore,
    rng: ThreadRng,
}

impl Game {
    pub fn new(store: HighScoreStore) -> Self {
        let mut rng = rand::rng();
        let high_score = store.load();
        Game {
            board: Board::default(),
            piece: Piece::spawn(&mut rng),
            phase: Phase::NotStarted,
            score: 0,
            high_score,
            drop_counter: 0,
            store,
            rng,
        }
    }

    /// Fresh board, score back to zero, first piece spawned. Doubles as the
    /// restart path after a game over.
    pub fn start(&mut self) {
        self.board = Board::default();
        self.score = 0;
        self.drop_counter = 0;
        self.piece = Piece::spawn(&mut self.rng);
        self.phase = Phase::Running;
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            // reset the drop counter so resuming never fires an instant drop
            Phase::Paused => {
                self.drop_counter = 0;
                Phase::Running
            }
            other => other,
        };
    }

    /// Called once per host loop iteration. Auto-drops one row every
    /// TICKS_PER_DROP calls while running; the counter does not advance in
    /// any other phase, so there is no drop backlog to catch up on.
    pub fn on_tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.drop_counter += 1;
        if self.drop_counter >= TICKS_PER_DROP {
            self.drop_counter = 0;
            self.advance_one_row();
        }
    }

    pub fn on_input(&mut self, cmd: Command) {
        if self.phase != Phase::Running {
            return;
        }
        match cmd {
            Command::Left => self.try_shift(-1),
            Command::Right => self.try_shift(1),
            Command::SoftDrop => {
                self.advance_one_row();
                self.drop_counter = 0;
            }
            Command::Rotate => self.rotate_piece(),
            Command::HardDrop => {
                while self.advance_one_row() {}
            }
        }
    }

    fn try_shift(&mut self, dx: i32) {
        let mut moved = self.piece;
        moved.x += dx;
        if self.board.can_place(&moved) {
            self.piece = moved;
        }
    }

    /// One atomic unit of progress: move the piece down a row, or lock it
    /// where it stands, sweep full rows and spawn the next piece. Returns
    /// whether the piece is still falling.
    fn advance_one_row(&mut self) -> bool {
        let mut moved = self.piece;
        moved.y += 1;
        if self.board.can_place(&moved) {
            self.piece = moved;
            return true;
        }
        self.lock_piece();
        false
    }

    /// Clockwise rotation with a bounded horizontal kick search: cumulative
    /// offsets +1, -2, +3, -4, ... until the placement fits or the offset
    /// exceeds the rotated width + 1, in which case nothing changes.
    fn rotate_piece(&mut self) {
        let mut candidate = self.piece;
        candidate.rotation = (candidate.rotation + 1) % 4;
        let (width, _) = candidate.kind.dim(candidate.rotation);
        let mut offset = 1i32;
        while !self.board.can_place(&candidate) {
            candidate.x += offset;
            offset = -(offset + offset.signum());
            if offset > width + 1 {
                return;
            }
        }
        self.piece = candidate;
    }

    fn lock_piece(&mut self) {
        let id = self.piece.kind.color_id();
        for (x, y) in self.piece.cells() {
            if y >= 0 {
                self.board.set(x, y, id);
            }
        }
        let cleared = self.sweep();
        if cleared > 0 {
            self.score += cleared * POINTS_PER_LINE * cleared;
            if self.score > self.high_score {
                self.high_score = self.score;
                let _ = self.store.save(self.high_score);
            }
        }
        self.piece = Piece::spawn(&mut self.rng);
        // a spawn that cannot be placed is the one and only game-over rule
        if !self.board.can_place(&self.piece) {
            self.phase = Phase::Over;
        }
    }

    /// Remove every full row, bottom to top, re-examining an index after the
    /// rows above have shifted into it. Returns the number of rows cleared.
    fn sweep(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = ROWS - 1;
        loop {
            if self.board.is_filled(y) {
                self.board.wipe(y);
                cleared += 1;
            } else if y == 0 {
                break;
            } else {
                y -= 1;
            }
        }
        cleared
    }
}
