use approx::assert_relative_eq;
use fea_linear::math;
use fea_linear::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Three bars in series between two walls, load at the first interior node
fn build_stepped_bar_model() -> Model {
    let (e1, a1) = (30e6, 1.0);
    let (e2, a2) = (15e6, 2.0);
    let l = 30.0;

    let mut model = Model::bar();
    let n: Vec<usize> = (0..4)
        .map(|i| model.add_node(Node::new(i as f64 * l, 0.0)))
        .collect();

    model.add_element(Bar::new([n[0], n[1]], e1, a1, l)).unwrap();
    model.add_element(Bar::new([n[1], n[2]], e1, a1, l)).unwrap();
    model.add_element(Bar::new([n[2], n[3]], e2, a2, l)).unwrap();

    model.add_constraint(n[0], Constraint::roller_x()).unwrap();
    model.add_constraint(n[3], Constraint::roller_x()).unwrap();
    model.add_force(n[1], &[3000.0]).unwrap();
    model
}

/// Three truss members meeting at a loaded joint; other ends pinned
fn build_three_member_truss() -> Model {
    let (e, a) = (30e6, 2.0);

    let mut model = Model::truss();
    let n0 = model.add_node(Node::new(0.0, 0.0));
    let n1 = model.add_node(Node::new(0.0, 120.0));
    let n2 = model.add_node(Node::new(120.0, 120.0));
    let n3 = model.add_node(Node::new(120.0, 0.0));

    model.add_element(Truss::new([n0, n1], e, a)).unwrap();
    model.add_element(Truss::new([n0, n2], e, a)).unwrap();
    model.add_element(Truss::new([n0, n3], e, a)).unwrap();

    for n in [n1, n2, n3] {
        model.add_constraint(n, Constraint::pinned()).unwrap();
    }
    model.add_force(n0, &[0.0, -10000.0]).unwrap();
    model
}

#[test]
fn test_spring_chain_with_prescribed_displacement() {
    init_logger();

    let k = 200e3;
    let mut model = Model::spring();
    let n: Vec<usize> = (0..5)
        .map(|i| model.add_node(Node::new(i as f64, 0.0)))
        .collect();
    for i in 0..4 {
        model.add_element(Spring::new([n[i], n[i + 1]], k)).unwrap();
    }

    model.add_constraint(n[0], Constraint::roller_x()).unwrap();
    model.add_constraint(n[4], Constraint::new().with_ux(0.02)).unwrap();
    model.add_force(n[3], &[4000.0]).unwrap();
    model.solve().unwrap();

    let expected = [0.0, 0.01, 0.02, 0.03, 0.02];
    for (label, &u) in expected.iter().enumerate() {
        let ux = model.node(label).unwrap().ux().unwrap();
        assert_relative_eq!(ux, u, epsilon = 1e-12);
    }

    assert_relative_eq!(model.node(n[0]).unwrap().fx(), -2000.0, max_relative = 1e-9);
    assert_relative_eq!(model.node(n[4]).unwrap().fx(), -2000.0, max_relative = 1e-9);
    // Free nodes recover their applied loads
    assert_relative_eq!(model.node(n[3]).unwrap().fx(), 4000.0, max_relative = 1e-9);
    assert_relative_eq!(model.node(n[1]).unwrap().fx(), 0.0, epsilon = 1e-6);

    assert_relative_eq!(model.element_axial_force(0).unwrap(), 2000.0, max_relative = 1e-9);
    assert_relative_eq!(model.element_axial_force(3).unwrap(), -2000.0, max_relative = 1e-9);
}

#[test]
fn test_stepped_bar_between_walls() {
    init_logger();

    let mut model = build_stepped_bar_model();
    model.solve().unwrap();

    let u = model.displacement_vector().unwrap();
    assert_relative_eq!(u[0], 0.0);
    assert_relative_eq!(u[1], 0.002, max_relative = 1e-9);
    assert_relative_eq!(u[2], 0.001, max_relative = 1e-9);
    assert_relative_eq!(u[3], 0.0);

    let f = model.nodal_force_vector().unwrap();
    assert_relative_eq!(f[0], -2000.0, max_relative = 1e-9);
    assert_relative_eq!(f[1], 3000.0, max_relative = 1e-9);
    assert_relative_eq!(f[2], 0.0, epsilon = 1e-6);
    assert_relative_eq!(f[3], -1000.0, max_relative = 1e-9);

    assert_relative_eq!(model.element_axial_stress(0).unwrap(), 2000.0, max_relative = 1e-9);
    assert_relative_eq!(model.element_axial_stress(1).unwrap(), -1000.0, max_relative = 1e-9);
    assert_relative_eq!(model.element_axial_stress(2).unwrap(), -500.0, max_relative = 1e-9);
}

#[test]
fn test_continuous_beam_with_midspan_support() {
    init_logger();

    let (e, i, l) = (30e6, 500.0, 120.0);
    let p = 10e3;

    let mut model = Model::beam();
    let n: Vec<usize> = (0..5)
        .map(|k| model.add_node(Node::new(k as f64 * l, 0.0)))
        .collect();
    for k in 0..4 {
        model.add_element(Beam::new([n[k], n[k + 1]], e, i, l)).unwrap();
    }

    model.add_constraint(n[0], Constraint::fixed()).unwrap();
    model.add_constraint(n[2], Constraint::simple()).unwrap();
    model.add_constraint(n[4], Constraint::fixed()).unwrap();
    model.add_force(n[1], &[-p]).unwrap();
    model.add_force(n[3], &[-p]).unwrap();
    model.solve().unwrap();

    for k in [1, 3] {
        let d = model.node_displacement(n[k]).unwrap();
        assert_relative_eq!(d.uy.unwrap(), -0.048, max_relative = 1e-9);
        assert_eq!(d.ux, None);
    }
    for k in 0..5 {
        let ur = model.node(n[k]).unwrap().ur().unwrap();
        assert_relative_eq!(ur, 0.0, epsilon = 1e-12);
    }

    let f0 = model.node_forces(n[0]).unwrap();
    assert_relative_eq!(f0.fy, 5000.0, max_relative = 1e-9);
    assert_relative_eq!(f0.m, 300000.0, max_relative = 1e-9);

    let f2 = model.node_forces(n[2]).unwrap();
    assert_relative_eq!(f2.fy, 10000.0, max_relative = 1e-9);
    assert_relative_eq!(f2.m, 0.0, epsilon = 1e-6);

    let f4 = model.node_forces(n[4]).unwrap();
    assert_relative_eq!(f4.fy, 5000.0, max_relative = 1e-9);
    assert_relative_eq!(f4.m, -300000.0, max_relative = 1e-9);

    // End forces of the first span: shear 5000, fixed-end moment 300000
    let ends = model.element_forces(0).unwrap();
    assert_relative_eq!(ends[0], 5000.0, max_relative = 1e-9);
    assert_relative_eq!(ends[1], 300000.0, max_relative = 1e-9);
}

#[test]
fn test_three_member_truss() {
    init_logger();

    let mut model = build_three_member_truss();
    model.solve().unwrap();

    let d = model.node_displacement(0).unwrap();
    assert_relative_eq!(d.ux.unwrap(), 0.0041421356, max_relative = 1e-7);
    assert_relative_eq!(d.uy.unwrap(), -0.0158578644, max_relative = 1e-7);

    assert_relative_eq!(model.element_axial_force(0).unwrap(), 7928.93, max_relative = 1e-5);
    assert_relative_eq!(model.element_axial_force(1).unwrap(), 2928.93, max_relative = 1e-5);
    assert_relative_eq!(model.element_axial_force(2).unwrap(), -2071.07, max_relative = 1e-5);

    let r1 = model.node_forces(1).unwrap();
    assert_relative_eq!(r1.fx, 0.0, epsilon = 1e-6);
    assert_relative_eq!(r1.fy, 7928.93, max_relative = 1e-5);

    let r2 = model.node_forces(2).unwrap();
    assert_relative_eq!(r2.fx, 2071.07, max_relative = 1e-5);
    assert_relative_eq!(r2.fy, 2071.07, max_relative = 1e-5);

    let r3 = model.node_forces(3).unwrap();
    assert_relative_eq!(r3.fx, -2071.07, max_relative = 1e-5);
    assert_relative_eq!(r3.fy, 0.0, epsilon = 1e-6);
}

#[test]
fn test_truss_equilibrium() {
    init_logger();

    let mut model = build_three_member_truss();
    model.solve().unwrap();

    let sum_fx: f64 = model.nodes().iter().map(|n| n.fx()).sum();
    let sum_fy: f64 = model.nodes().iter().map(|n| n.fy()).sum();
    assert_relative_eq!(sum_fx, 0.0, epsilon = 1e-6);
    assert_relative_eq!(sum_fy, 0.0, epsilon = 1e-6);
}

#[test]
fn test_single_triangle_patch() {
    init_logger();

    let p = 1000.0;
    let t = 0.1;

    let mut model = Model::linear_triangle();
    let n0 = model.add_node(Node::new(0.0, 0.0));
    let n1 = model.add_node(Node::new(1.0, 0.0));
    let n2 = model.add_node(Node::new(0.0, 1.0));
    model.add_element(LinearTriangle::new([n0, n1, n2], 200e9, 0.3, t)).unwrap();

    model.add_constraint(n0, Constraint::pinned()).unwrap();
    model.add_constraint(n2, Constraint::pinned()).unwrap();
    model.add_force(n1, &[p, 0.0]).unwrap();
    model.solve().unwrap();

    let d = model.node_displacement(n1).unwrap();
    assert_relative_eq!(d.ux.unwrap(), 9.1e-8, max_relative = 1e-9);
    assert_relative_eq!(d.uy.unwrap(), 0.0, epsilon = 1e-20);

    let stress = model.element_stress(0).unwrap();
    assert_relative_eq!(stress.sx, 2.0 * p / t, max_relative = 1e-9);
    assert_relative_eq!(stress.sy, 0.3 * 2.0 * p / t, max_relative = 1e-9);
    assert_relative_eq!(stress.sxy, 0.0, epsilon = 1e-6);

    let strain = model.element_strain(0).unwrap();
    assert_relative_eq!(strain.ex, 9.1e-8, max_relative = 1e-9);

    let r0 = model.node_forces(n0).unwrap();
    assert_relative_eq!(r0.fx, -1000.0, max_relative = 1e-9);
    assert_relative_eq!(r0.fy, -300.0, max_relative = 1e-9);
    let r2 = model.node_forces(n2).unwrap();
    assert_relative_eq!(r2.fx, 0.0, epsilon = 1e-6);
    assert_relative_eq!(r2.fy, 300.0, max_relative = 1e-9);
}

#[test]
fn test_two_triangle_uniform_tension() {
    init_logger();

    let (e, nu, t) = (200e9, 0.3, 0.1);
    let sigma = 1000.0;

    let mut model = Model::linear_triangle();
    let n0 = model.add_node(Node::new(0.0, 0.0));
    let n1 = model.add_node(Node::new(1.0, 0.0));
    let n2 = model.add_node(Node::new(1.0, 1.0));
    let n3 = model.add_node(Node::new(0.0, 1.0));
    model.add_element(LinearTriangle::new([n0, n1, n2], e, nu, t)).unwrap();
    model.add_element(LinearTriangle::new([n0, n2, n3], e, nu, t)).unwrap();

    model.add_constraint(n0, Constraint::pinned()).unwrap();
    model.add_constraint(n3, Constraint::roller_x()).unwrap();
    // Consistent loads for a uniform traction on the edge x = 1
    model.add_force(n1, &[sigma * t / 2.0, 0.0]).unwrap();
    model.add_force(n2, &[sigma * t / 2.0, 0.0]).unwrap();
    model.solve().unwrap();

    assert_relative_eq!(model.node(n1).unwrap().ux().unwrap(), sigma / e, max_relative = 1e-6);
    assert_relative_eq!(model.node(n2).unwrap().uy().unwrap(), -nu * sigma / e, max_relative = 1e-6);

    for element in 0..2 {
        let s = model.element_stress(element).unwrap();
        assert_relative_eq!(s.sx, sigma, max_relative = 1e-6);
        assert_relative_eq!(s.sy, 0.0, epsilon = 1e-6);
        assert_relative_eq!(s.sxy, 0.0, epsilon = 1e-6);
    }

    // Node 0 is shared by both triangles, node 1 by one
    let s0 = model.node_stress(n0).unwrap();
    assert_relative_eq!(s0.sx, sigma, max_relative = 1e-6);
    assert_relative_eq!(s0.von_mises(), sigma, max_relative = 1e-6);
    assert_relative_eq!(model.node_stress(n1).unwrap().sx, sigma, max_relative = 1e-6);
    assert_relative_eq!(model.node_strain(n1).unwrap().ex, sigma / e, max_relative = 1e-6);
}

#[test]
fn test_node_without_elements_has_zero_stress() {
    let mut model = Model::linear_triangle();
    let lonely = model.add_node(Node::new(5.0, 5.0));
    assert_eq!(model.node_stress(lonely).unwrap(), Stress::default());
}

#[test]
fn test_rigid_body_mode_is_reported_as_singular() {
    init_logger();

    // Only one pin: the truss can rotate about it
    let mut model = Model::truss();
    let n0 = model.add_node(Node::new(0.0, 0.0));
    let n1 = model.add_node(Node::new(1.0, 0.0));
    let n2 = model.add_node(Node::new(0.0, 1.0));
    model.add_element(Truss::new([n0, n1], 1.0, 1.0)).unwrap();
    model.add_element(Truss::new([n1, n2], 1.0, 1.0)).unwrap();
    model.add_element(Truss::new([n2, n0], 1.0, 1.0)).unwrap();
    model.add_constraint(n0, Constraint::pinned()).unwrap();
    model.add_force(n1, &[0.0, 1.0]).unwrap();

    let err = model.solve().unwrap_err();
    assert!(matches!(err, FEAError::SingularMatrix));
    assert!(!model.is_solved());
}

#[test]
fn test_global_matrix_is_symmetric() {
    let mut model = build_three_member_truss();
    model.solve().unwrap();
    let kg = model.global_matrix().unwrap();
    assert_eq!(kg.shape(), (8, 8));
    assert!(math::is_symmetric(kg, 1e-12));
}

#[test]
fn test_repeated_solve_and_load_overwrite() {
    let mut model = build_stepped_bar_model();
    model.solve().unwrap();
    let first = model.displacement_vector().unwrap().clone();
    model.solve().unwrap();
    assert_eq!(&first, model.displacement_vector().unwrap());

    // Doubling the load by overwriting doubles the response
    model.add_force(1, &[6000.0]).unwrap();
    model.solve().unwrap();
    assert_relative_eq!(model.node(1).unwrap().ux().unwrap(), 0.004, max_relative = 1e-9);
}

#[test]
fn test_summary_of_truss() {
    let mut model = build_three_member_truss();
    model.solve().unwrap();

    let summary = model.summary().unwrap();
    assert_eq!(summary.num_nodes, 4);
    assert_eq!(summary.num_elements, 3);
    assert_eq!(summary.total_dofs, 8);
    assert_eq!(summary.free_dofs, 2);
    assert_eq!(summary.max_disp_node, 0);
    assert_eq!(summary.max_reaction_node, 1);
    assert_relative_eq!(summary.max_reaction, 7928.93, max_relative = 1e-5);
}
