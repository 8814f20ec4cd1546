#[cfg(test)]
mod _tests_neighbor_table {
    use super::super::finite_lattice::Lattice;
    use super::super::geometry_construction::*;
    use super::super::lattice_extent::LatticeExtent;
    use super::super::neighbor_table::*;
    use nalgebra::DMatrix;

    fn create_chain(l: usize) -> Lattice {
        Lattice::new(chain(1.0).unwrap(), LatticeExtent::chain(l).unwrap()).unwrap()
    }

    fn create_honeycomb(l1: usize, l2: usize) -> Lattice {
        Lattice::new(honeycomb(1.0).unwrap(), LatticeExtent::new(l1, l2, 1).unwrap()).unwrap()
    }

    // Checks canonical form, ordering and that the permutation reproduces the sorted table
    fn assert_sorted_consistently(original: &NeighborTable, sorted: &NeighborTable, permutation: &[usize]) {
        assert_eq!(sorted.len(), original.len());
        assert!(sorted.iter().all(|p| p[0] <= p[1]));
        assert!(sorted.pairs().windows(2).all(|w| w[0] <= w[1]));

        let canonical: Vec<[usize; 2]> = original
            .iter()
            .map(|&[a, b]| if a > b { [b, a] } else { [a, b] })
            .collect();
        for (i, &j) in permutation.iter().enumerate() {
            assert_eq!(sorted.pairs()[i], canonical[j]);
        }
    }

    #[test]
    fn test_chain_neighbor_table() {
        let lattice = create_chain(4);
        let table = lattice.calc_neighbor_table(0, 0, &[1, 0, 0]).unwrap();
        assert_eq!(table.pairs(), &[[0, 1], [1, 2], [2, 3], [3, 0]]);
    }

    #[test]
    fn test_chain_sort_scenario() {
        let lattice = create_chain(4);
        let mut table = lattice.calc_neighbor_table(0, 0, &[1, 0, 0]).unwrap();
        let original = table.clone();

        let permutation = sort_neighbor_table(&mut table);

        assert_eq!(table.pairs(), &[[0, 1], [0, 3], [1, 2], [2, 3]]);
        assert_eq!(permutation, vec![0, 3, 1, 2]);
        // Sorted position 1 came from original position 3
        assert_eq!(permutation[1], 3);
        assert_sorted_consistently(&original, &table, &permutation);
    }

    #[test]
    fn test_sort_is_stable_for_duplicates() {
        // With two cells, the forward and backward bonds coincide after canonicalization
        let lattice = create_chain(2);
        let mut table = lattice.calc_neighbor_table(0, 0, &[1, 0, 0]).unwrap();
        assert_eq!(table.pairs(), &[[0, 1], [1, 0]]);

        let permutation = sort_neighbor_table(&mut table);
        assert_eq!(table.pairs(), &[[0, 1], [0, 1]]);
        assert_eq!(permutation, vec![0, 1]);
    }

    #[test]
    fn test_sort_honeycomb_bonds() {
        let lattice = create_honeycomb(3, 3);
        let bonds = [
            Bond::new(0, 1, [0, 0, 0]),
            Bond::new(0, 1, [-1, 0, 0]),
            Bond::new(0, 1, [0, -1, 0]),
        ];
        let original = lattice.calc_bond_neighbor_table(&bonds).unwrap();
        let mut sorted = original.clone();
        let permutation = sort_neighbor_table(&mut sorted);
        assert_sorted_consistently(&original, &sorted, &permutation);

        // Reordering the unsorted table with the permutation lines it up with the sorted one
        let reordered = original.reorder(&permutation).unwrap();
        for (r, s) in reordered.iter().zip(sorted.iter()) {
            assert_eq!([r[0].min(r[1]), r[0].max(r[1])], *s);
        }
    }

    #[test]
    fn test_bond_table_concatenates_in_bond_order() {
        let lattice = create_honeycomb(2, 2);
        let bonds = [Bond::new(0, 1, [0, 0, 0]), Bond::new(1, 0, [1, 0, 0])];
        let table = lattice.calc_bond_neighbor_table(&bonds).unwrap();

        assert_eq!(table.len(), 2 * lattice.ncells());
        let first = lattice.calc_neighbor_table(0, 1, &[0, 0, 0]).unwrap();
        let second = lattice.calc_neighbor_table(1, 0, &[1, 0, 0]).unwrap();
        assert_eq!(&table.pairs()[..4], first.pairs());
        assert_eq!(&table.pairs()[4..], second.pairs());

        // Orbital 1 sites start the second block
        assert_eq!(second.pairs()[0], [1, 2]);
    }

    #[test]
    fn test_one_row_per_cell() {
        let lattice = Lattice::new(kagome(1.0).unwrap(), LatticeExtent::new(4, 3, 1).unwrap()).unwrap();
        for orbit1 in 0..3 {
            for orbit2 in 0..3 {
                let table = lattice.calc_neighbor_table(orbit1, orbit2, &[1, -1, 0]).unwrap();
                assert_eq!(table.len(), lattice.nsites() / lattice.norbits());
                assert!(table.iter().all(|p| lattice.site_orbits()[p[0]] == orbit1));
                assert!(table.iter().all(|p| lattice.site_orbits()[p[1]] == orbit2));
            }
        }
    }

    #[test]
    fn test_invalid_displacement_length() {
        let lattice = create_chain(4);
        assert!(lattice.calc_neighbor_table(0, 0, &[1]).unwrap_err().is_invalid_argument());
        assert!(lattice.calc_neighbor_table(0, 0, &[1, 0, 0, 0]).is_err());
    }

    #[test]
    fn test_invalid_orbital() {
        let lattice = create_honeycomb(2, 2);
        assert!(lattice.calc_neighbor_table(2, 0, &[0, 0, 0]).is_err());
        assert!(lattice.calc_neighbor_table(0, 2, &[0, 0, 0]).is_err());
        assert!(lattice
            .calc_bond_neighbor_table(&[Bond::new(0, 3, [0, 0, 0])])
            .is_err());
    }

    #[test]
    fn test_matrix_roundtrip_and_sort() {
        let mut matrix = DMatrix::from_row_slice(2, 4, &[0, 1, 2, 3, 1, 2, 3, 0]);
        let table = NeighborTable::from_matrix(&matrix).unwrap();
        assert_eq!(table.to_matrix(), matrix);

        let permutation = sort_neighbor_matrix(&mut matrix).unwrap();
        assert_eq!(permutation, vec![0, 3, 1, 2]);
        assert_eq!(matrix, DMatrix::from_row_slice(2, 4, &[0, 0, 1, 2, 1, 3, 2, 3]));
    }

    #[test]
    fn test_matrix_must_have_two_rows() {
        let mut three_rows = DMatrix::<usize>::zeros(3, 4);
        assert!(NeighborTable::from_matrix(&three_rows).is_err());
        assert!(sort_neighbor_matrix(&mut three_rows).unwrap_err().is_invalid_argument());
        // Left untouched on failure
        assert_eq!(three_rows, DMatrix::<usize>::zeros(3, 4));
    }

    #[test]
    fn test_reorder_rejects_bad_permutations() {
        let table = NeighborTable::new(vec![[0, 1], [1, 2], [2, 0]]);
        assert!(table.reorder(&[0, 1]).is_err());
        assert!(table.reorder(&[0, 1, 3]).is_err());
        assert!(table.reorder(&[0, 0, 1]).is_err());
        assert_eq!(
            table.reorder(&[2, 0, 1]).unwrap().pairs(),
            &[[2, 0], [0, 1], [1, 2]]
        );
    }

    #[test]
    fn test_empty_table_sorts() {
        let mut table = NeighborTable::default();
        assert!(sort_neighbor_table(&mut table).is_empty());
        assert!(table.is_empty());
    }
}
