use criterion::{criterion_group, criterion_main, Criterion};
use dpll_sat::sat::cnf::Cnf;
use dpll_sat::sat::dpll::Dpll;
use dpll_sat::sat::solver::Solver;
use dpll_sat::sudoku::solver::parse_sudoku;
use std::hint::black_box;

/// `pigeons` into `holes`: unsatisfiable whenever pigeons > holes, and a
/// classic worst case for solvers without clause learning.
fn pigeonhole(pigeons: usize, holes: usize) -> Cnf {
    let var = |pigeon: usize, hole: usize| ((pigeon - 1) * holes + hole) as i32;
    let mut clauses = Vec::new();

    for pigeon in 1..=pigeons {
        clauses.push((1..=holes).map(|hole| var(pigeon, hole)).collect());
    }
    for hole in 1..=holes {
        for first in 1..=pigeons {
            for second in (first + 1)..=pigeons {
                clauses.push(vec![-var(first, hole), -var(second, hole)]);
            }
        }
    }

    Cnf::new(clauses)
}

/// A single unit followed by a chain of implications: pure propagation.
fn chain(length: usize) -> Cnf {
    let mut clauses = vec![vec![1]];
    for v in 1..length {
        clauses.push(vec![-(v as i32), v as i32 + 1]);
    }
    Cnf::new(clauses)
}

const DIAGONAL_PUZZLE: &str = "\
.34678912
6.2195348
19.342567
859.61423
4268.3791
71392.856
961537.84
2874196.5
34528617.
";

fn bench_pigeonhole(c: &mut Criterion) {
    let cnf = pigeonhole(5, 4);
    c.bench_function("pigeonhole 5 into 4", |b| {
        b.iter(|| {
            let mut solver: Dpll = Solver::new(cnf.clone());
            black_box(solver.solve());
        });
    });
}

fn bench_chain(c: &mut Criterion) {
    let cnf = chain(200);
    c.bench_function("propagation chain of 200", |b| {
        b.iter(|| {
            let mut solver: Dpll = Solver::new(cnf.clone());
            black_box(solver.solve());
        });
    });
}

fn bench_sudoku(c: &mut Criterion) {
    let puzzle = parse_sudoku(DIAGONAL_PUZZLE).unwrap();
    let cnf: Cnf = puzzle.to_cnf();

    c.bench_function("sudoku diagonal", |b| {
        b.iter(|| {
            let mut solver: Dpll = Solver::new(cnf.clone());
            black_box(solver.solve());
        });
    });
}

criterion_group!(benches, bench_pigeonhole, bench_chain, bench_sudoku);

criterion_main!(benches);
