use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

// Constants for Zobrist hashing
const PIECES: [&str; 6] = ["pawn", "knight", "bishop", "rook", "queen", "king"];
const SQUARES: usize = 64;

// Transposition snapshots are keyed by these numbers, so they must be identical
// from one build to the next.
const ZOBRIST_SEED: u64 = 0x5EED_A70B_1C00_0001;

fn generate_random_64bit(rng: &mut StdRng) -> u64 {
    rng.gen()
}

fn write_zobrist_tables(out: &mut BufWriter<File>) -> std::io::Result<()> {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut zobrist_table = [[[0u64; 2]; SQUARES]; PIECES.len()];
    for piece_table in zobrist_table.iter_mut() {
        for square_table in piece_table.iter_mut() {
            for entry in square_table.iter_mut() {
                *entry = generate_random_64bit(&mut rng);
            }
        }
    }

    let mut zobrist_castling_rights = [0u64; 16];
    for rights in zobrist_castling_rights.iter_mut() {
        *rights = generate_random_64bit(&mut rng);
    }
    // no castling rights contributes nothing to the hash
    zobrist_castling_rights[0] = 0;

    let mut zobrist_en_passant_file = [0u64; 8];
    for file in zobrist_en_passant_file.iter_mut() {
        *file = generate_random_64bit(&mut rng);
    }

    let zobrist_black_to_move = generate_random_64bit(&mut rng);

    writeln!(out, "#[rustfmt::skip]")?;
    writeln!(out, "pub const ZOBRIST_PIECES_TABLE: [[[u64; 2]; 64]; 6] = [")?;
    for (piece_index, piece_table) in zobrist_table.iter().enumerate() {
        writeln!(out, "    [  // {}", PIECES[piece_index])?;
        for (square_index, square_table) in piece_table.iter().enumerate() {
            writeln!(
                out,
                "        [{}, {}],  // Square {}",
                square_table[0], square_table[1], square_index
            )?;
        }
        writeln!(out, "    ],")?;
    }
    writeln!(out, "];")?;

    writeln!(out, "\n#[rustfmt::skip]")?;
    writeln!(out, "pub const ZOBRIST_CASTLING_RIGHTS_TABLE: [u64; 16] = [")?;
    for rights in zobrist_castling_rights.iter() {
        writeln!(out, "    {},", rights)?;
    }
    writeln!(out, "];")?;

    writeln!(out, "\n#[rustfmt::skip]")?;
    writeln!(out, "pub const ZOBRIST_EN_PASSANT_FILE_TABLE: [u64; 8] = [")?;
    for file in zobrist_en_passant_file.iter() {
        writeln!(out, "    {},", file)?;
    }
    writeln!(out, "];")?;

    writeln!(
        out,
        "\npub const ZOBRIST_BLACK_TO_MOVE: u64 = {};",
        zobrist_black_to_move
    )?;

    Ok(())
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    let mut out: PathBuf = std::env::var("OUT_DIR").unwrap().into();
    out.push("zobrist_tables.rs");
    let mut out = BufWriter::new(File::create(out).unwrap());
    write_zobrist_tables(&mut out).unwrap();
}
