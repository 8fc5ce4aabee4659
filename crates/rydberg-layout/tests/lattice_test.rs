use rydberg_layout::lattice::{self, LatticeKind};
use rydberg_layout::{ErrorKind, Point};

fn assert_close(a: &Point, b: (f64, f64)) {
    assert!(
        (a.x - b.0).abs() < 1e-4 && (a.y - b.1).abs() < 1e-4,
        "{a:?} != {b:?}"
    );
}

#[test]
fn triangular_lattice_starts_at_origin_then_first_ring_counter_clockwise() {
    let l = lattice::generate(LatticeKind::Triangular, 7, 4.0).unwrap();
    let expected = [
        (0.0, 0.0),
        (4.0, 0.0),
        (2.0, 3.4641),
        (-2.0, 3.4641),
        (-4.0, 0.0),
        (-2.0, -3.4641),
        (2.0, -3.4641),
    ];
    assert_eq!(l.len(), 7);
    for (site, want) in l.sites().iter().zip(expected) {
        assert_close(site, want);
    }
}

#[test]
fn triangular_second_ring_orders_root_three_before_two_spacings() {
    let l = lattice::generate(LatticeKind::Triangular, 19, 1.0).unwrap();
    let norms: Vec<f64> = l.sites().iter().map(|p| p.coords.norm()).collect();
    for n in &norms[7..13] {
        assert!((n - 3f64.sqrt()).abs() < 1e-9);
    }
    for n in &norms[13..19] {
        assert!((n - 2.0).abs() < 1e-9);
    }
    assert_close(&l.sites()[7], (1.5, 3f64.sqrt() / 2.0));
}

#[test]
fn square_lattice_rings() {
    let l = lattice::generate(LatticeKind::Square, 9, 5.0).unwrap();
    let expected = [
        (0.0, 0.0),
        (5.0, 0.0),
        (0.0, 5.0),
        (-5.0, 0.0),
        (0.0, -5.0),
        (5.0, 5.0),
        (-5.0, 5.0),
        (-5.0, -5.0),
        (5.0, -5.0),
    ];
    for (site, want) in l.sites().iter().zip(expected) {
        assert_close(site, want);
    }
    assert_eq!(l.spacing(), 5.0);
    assert_eq!(l.kind(), LatticeKind::Square);
}

#[test]
fn large_lattices_are_complete_and_sorted_outwards() {
    for kind in [LatticeKind::Triangular, LatticeKind::Square] {
        let l = lattice::generate(kind, 160, 2.0).unwrap();
        assert_eq!(l.len(), 160);

        let norms: Vec<f64> = l.sites().iter().map(|p| p.coords.norm()).collect();
        for pair in norms.windows(2) {
            assert!(pair[0] <= pair[1] + 1e-9);
        }

        for (a, pa) in l.sites().iter().enumerate() {
            for pb in &l.sites()[a + 1..] {
                assert!(nalgebra::distance(pa, pb) >= 2.0 - 1e-9);
            }
        }
    }
}

#[test]
fn generation_is_deterministic() {
    let a = lattice::generate(LatticeKind::Triangular, 50, 3.0).unwrap();
    let b = lattice::generate(LatticeKind::Triangular, 50, 3.0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_requests_are_configuration_errors() {
    let err = lattice::generate(LatticeKind::Square, 0, 1.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    for spacing in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = lattice::generate(LatticeKind::Square, 4, spacing).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}

#[test]
fn lattice_kind_parses_names() {
    assert_eq!("triangular".parse::<LatticeKind>().unwrap(), LatticeKind::Triangular);
    assert_eq!(" SQUARE ".parse::<LatticeKind>().unwrap(), LatticeKind::Square);
    assert!("dummy".parse::<LatticeKind>().is_err());
    assert_eq!(LatticeKind::default(), LatticeKind::Triangular);
    assert_eq!(LatticeKind::Square.to_string(), "square");
}
