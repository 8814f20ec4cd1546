#[cfg(test)]
mod _tests_displacement {
    use super::super::displacement::minimum_image;
    use super::super::finite_lattice::Lattice;
    use super::super::geometry::Geometry;
    use super::super::geometry_construction::*;
    use super::super::lattice_extent::LatticeExtent;
    use nalgebra::Vector3;

    const TOL: f64 = 1e-10;

    #[test]
    fn test_minimum_image_even_extent() {
        assert_eq!(minimum_image(0, 4).unwrap(), 0);
        assert_eq!(minimum_image(1, 4).unwrap(), 1);
        assert_eq!(minimum_image(2, 4).unwrap(), 2);
        assert_eq!(minimum_image(3, 4).unwrap(), -1);
        assert_eq!(minimum_image(-1, 4).unwrap(), -1);
        assert_eq!(minimum_image(-2, 4).unwrap(), 2);
        assert_eq!(minimum_image(-3, 4).unwrap(), 1);
    }

    #[test]
    fn test_minimum_image_odd_extent() {
        assert_eq!(minimum_image(1, 3).unwrap(), 1);
        assert_eq!(minimum_image(2, 3).unwrap(), -1);
        assert_eq!(minimum_image(-1, 3).unwrap(), -1);
        assert_eq!(minimum_image(-2, 3).unwrap(), 1);
        assert_eq!(minimum_image(7, 1).unwrap(), 0);
    }

    #[test]
    fn test_minimum_image_zero_extent() {
        let err = minimum_image(3, 0).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(minimum_image(0, 0).is_err());
    }

    #[test]
    fn test_minimum_image_extreme_offsets() {
        assert_eq!(minimum_image(i64::MAX, 2).unwrap(), 1);
        assert_eq!(minimum_image(i64::MIN, 2).unwrap(), 0);
        assert_eq!(minimum_image(i64::MIN, 3).unwrap(), 1);
    }

    #[test]
    fn test_bilayer_displacements_carry_interlayer_offset() {
        let geometry = Geometry::from_vectors(
            &[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            &[[0.0, 0.0, 0.0], [0.0, 0.0, 0.5]],
        )
        .unwrap();
        let lattice = Lattice::new(geometry, LatticeExtent::square(3).unwrap()).unwrap();

        // Top layer of cell (1, 0) relative to the bottom layer of cell (0, 0)
        let top = lattice.loc_to_site([1, 0, 0], 1).unwrap();
        let bottom = lattice.loc_to_site([0, 0, 0], 0).unwrap();
        let r = lattice.site_to_site_vec(top, bottom).unwrap();
        assert!((r - Vector3::new(1.0, 0.0, 0.5)).norm() < TOL);
        let r = lattice.site_to_site_vec(bottom, top).unwrap();
        assert!((r - Vector3::new(-1.0, 0.0, -0.5)).norm() < TOL);

        assert!((lattice.site_position(top).unwrap() - Vector3::new(1.0, 0.0, 0.5)).norm() < TOL);
        assert!(lattice.positions().iter().all(|p| p.z == 0.0 || p.z == 0.5));
    }

    #[test]
    fn test_chain_displacements() {
        let lattice = Lattice::new(chain(1.0).unwrap(), LatticeExtent::chain(4).unwrap()).unwrap();

        // Site 3 is one step behind site 0 through the boundary
        let r = lattice.site_to_site_vec(3, 0).unwrap();
        assert!((r - Vector3::new(-1.0, 0.0, 0.0)).norm() < TOL);
        let r = lattice.site_to_site_vec(0, 3).unwrap();
        assert!((r - Vector3::new(1.0, 0.0, 0.0)).norm() < TOL);
        let r = lattice.site_to_site_vec(2, 0).unwrap();
        assert!((r - Vector3::new(2.0, 0.0, 0.0)).norm() < TOL);
    }

    #[test]
    fn test_orbital_offset_included() {
        let lattice = Lattice::new(honeycomb(1.0).unwrap(), LatticeExtent::square(3).unwrap()).unwrap();
        let b1 = lattice.geometry().basis_vector(1).unwrap();

        let r = lattice.site_to_site_vec(1, 0).unwrap();
        assert!((r - b1).norm() < TOL);
        let r = lattice.site_to_site_vec(0, 1).unwrap();
        assert!((r + b1).norm() < TOL);
    }

    #[test]
    fn test_matches_positions_without_wrapping() {
        let lattice = Lattice::new(kagome(1.0).unwrap(), LatticeExtent::square(5).unwrap()).unwrap();
        // Cells (1, 1) and (2, 2) are close enough that no image correction applies
        let s1 = lattice.loc_to_site([2, 2, 0], 2).unwrap();
        let s2 = lattice.loc_to_site([1, 1, 0], 1).unwrap();
        let expected = lattice.positions()[s1] - lattice.positions()[s2];
        assert!((lattice.site_to_site_vec(s1, s2).unwrap() - expected).norm() < TOL);
    }

    #[test]
    fn test_antisymmetric_for_odd_extents() {
        let lattice = Lattice::new(honeycomb(1.0).unwrap(), LatticeExtent::new(3, 5, 1).unwrap()).unwrap();
        for s1 in 0..lattice.nsites() {
            for s2 in 0..lattice.nsites() {
                let forward = lattice.site_to_site_vec(s1, s2).unwrap();
                let backward = lattice.site_to_site_vec(s2, s1).unwrap();
                assert!((forward + backward).norm() < TOL);
            }
        }
    }

    #[test]
    fn test_buffer_variant_overwrites() {
        let lattice = Lattice::new(square(2.0).unwrap(), LatticeExtent::square(4).unwrap()).unwrap();
        let mut r = Vector3::new(9.0, 9.0, 9.0);
        lattice.site_to_site_vec_into(&mut r, 1, 0).unwrap();
        assert!((r - Vector3::new(2.0, 0.0, 0.0)).norm() < TOL);
        lattice.site_to_site_vec_into(&mut r, 12, 0).unwrap();
        assert!((r - Vector3::new(0.0, -2.0, 0.0)).norm() < TOL);
    }

    #[test]
    fn test_displacements_from() {
        let lattice = Lattice::new(square(1.0).unwrap(), LatticeExtent::square(3).unwrap()).unwrap();
        let vectors = lattice.displacements_from(4).unwrap();
        assert_eq!(vectors.len(), lattice.nsites());
        assert!(vectors[4].norm() < TOL);
        for (target, r) in vectors.iter().enumerate() {
            assert!((r - lattice.site_to_site_vec(target, 4).unwrap()).norm() < TOL);
        }
        assert!(lattice.displacements_from(9).is_err());
    }

    #[test]
    fn test_invalid_sites() {
        let lattice = Lattice::new(chain(1.0).unwrap(), LatticeExtent::chain(4).unwrap()).unwrap();
        assert!(lattice.site_to_site_vec(4, 0).unwrap_err().is_invalid_argument());
        assert!(lattice.site_to_site_vec(0, 4).is_err());
    }
}
