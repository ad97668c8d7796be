//! The simulation: an arena of points shared by every rope and net, their link
//! graph, and the fixed-step loop that advances them.

use crate::accumulator::FixedStepAccumulator;
use crate::config::{ForceConfig, SimulationConfig};
use crate::error::PhysicsError;
use crate::float::Float;
use crate::force;
use crate::integrator::{Integrator, IntegratorKind};
use crate::link::{Link, LinkGraph};
use crate::observer::StepObserver;
use crate::point::Point;
use crate::rope::RopeConfig;
use crate::topology::{StructureConfig, Topology};
use crate::vec::Vec;
use alloc::vec::Vec as AllocVec;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a rope or net owned by a [`Simulation`].
    pub struct StructureId;
}

/// A point addressed by its structure and its index within that structure.
/// Stays valid across rebuilds of other structures.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PointRef {
    pub structure: StructureId,
    pub index: usize,
}

impl PointRef {
    pub fn new(structure: StructureId, index: usize) -> Self {
        PointRef { structure, index }
    }
}

/// A rigid-body contact reported by the host.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CollisionEvent<V: Vec> {
    pub point: PointRef,
    /// Velocity of the other body relative to the point.
    pub relative_velocity: V,
    pub other_mass: V::Scalar,
}

#[derive(Clone, Debug)]
struct Structure<V: Vec> {
    config: StructureConfig<V>,
    offset: usize,
    len: usize,
    /// Internal links, in local indices.
    links: LinkGraph<V::Scalar>,
}

#[derive(Copy, Clone, Debug)]
struct PointLink<F: Float> {
    a: PointRef,
    b: PointRef,
    rest_length: F,
}

/// Owns every structure and advances them together.
///
/// Structures are created, rebuilt and destroyed only through this type.
/// Rebuilding is destructive: the structure's points are regenerated from its
/// config, and recorded cross-links and point links are re-applied afterwards.
pub struct Simulation<V: Vec> {
    config: SimulationConfig<V>,
    points: AllocVec<Point<V>>,
    links: LinkGraph<V::Scalar>,
    structures: SlotMap<StructureId, Structure<V>>,
    cross_links: AllocVec<(StructureId, StructureId)>,
    point_links: AllocVec<PointLink<V::Scalar>>,
    integrator: Integrator<V>,
    accumulator: FixedStepAccumulator<V::Scalar>,
    steps: u64,
}

impl<V: Vec> Simulation<V> {
    pub fn new(config: SimulationConfig<V>) -> Result<Self, PhysicsError> {
        let accumulator = FixedStepAccumulator::new(config.time_step, config.max_catch_up)?;
        Ok(Simulation {
            integrator: Integrator::new(config.integrator),
            config,
            points: AllocVec::new(),
            links: LinkGraph::new(0),
            structures: SlotMap::with_key(),
            cross_links: AllocVec::new(),
            point_links: AllocVec::new(),
            accumulator,
            steps: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig<V> {
        &self.config
    }

    pub fn force_config(&self) -> &ForceConfig<V> {
        &self.config.force
    }

    /// Force parameters can change between steps without a rebuild.
    pub fn force_config_mut(&mut self) -> &mut ForceConfig<V> {
        &mut self.config.force
    }

    pub fn set_integrator(&mut self, kind: IntegratorKind) {
        self.config.integrator = kind;
        self.integrator.set_kind(kind);
    }

    pub fn integrator(&self) -> &Integrator<V> {
        &self.integrator
    }

    /// Change the fixed step. Any partially accumulated frame time is dropped.
    pub fn set_time_step(&mut self, time_step: V::Scalar) -> Result<(), PhysicsError> {
        self.accumulator = FixedStepAccumulator::new(time_step, self.config.max_catch_up)?;
        self.config.time_step = time_step;
        Ok(())
    }

    pub fn accumulator(&self) -> &FixedStepAccumulator<V::Scalar> {
        &self.accumulator
    }

    /// Number of fixed steps run so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    // ----------------------------------------------------------------------
    // Topology
    // ----------------------------------------------------------------------

    /// Create a rope or net.
    pub fn add(&mut self, config: impl Into<StructureConfig<V>>) -> Result<StructureId, PhysicsError> {
        let config = config.into();
        let topology = Topology::build(&config)?;

        let offset = self.points.len();
        let len = topology.len();
        self.points.extend(topology.points);
        let id = self.structures.insert(Structure { config, offset, len, links: topology.links });
        self.relink()?;

        log::debug!("added structure {:?} with {} points at offset {}", id, len, offset);
        Ok(id)
    }

    /// Lay `rope_count` copies of a rope side by side, each shifted by
    /// `offset` from the previous one, and cross-link neighbors point by point.
    ///
    /// Cross-links use the rope's segment length as rest length, so an
    /// `offset` of that length gives a square mesh.
    pub fn add_rope_net(
        &mut self,
        config: RopeConfig<V>,
        rope_count: usize,
        offset: V,
    ) -> Result<AllocVec<StructureId>, PhysicsError> {
        config.validate()?;

        let mut ids = AllocVec::with_capacity(rope_count);
        for i in 0..rope_count {
            let shift = offset.scale(V::Scalar::from_usize(i));
            let mut rope = config.clone();
            rope.origin = rope.origin + shift;
            rope.root_anchor = rope.root_anchor.map(|a| a + shift);
            rope.end_anchor = rope.end_anchor.map(|a| a + shift);

            let id = self.add(rope)?;
            if let Some(&previous) = ids.last() {
                self.link_structures(id, previous)?;
            }
            ids.push(id);
        }
        Ok(ids)
    }

    /// Regenerate a structure from `config`, discarding its current points.
    ///
    /// Fails without changing anything if the config is invalid or the new
    /// point count would break a recorded cross-link.
    pub fn rebuild(&mut self, id: StructureId, config: impl Into<StructureConfig<V>>) -> Result<(), PhysicsError> {
        let config = config.into();
        if !self.structures.contains_key(id) {
            return Err(PhysicsError::UnknownStructure);
        }
        let topology = Topology::build(&config)?;
        let new_len = topology.len();

        for &(a, b) in &self.cross_links {
            let other = if a == id { b } else if b == id { a } else { continue };
            let found = self.structures[other].len;
            if found != new_len {
                return Err(PhysicsError::InvalidTopology { expected: new_len, found });
            }
        }

        let (old_offset, old_len) = {
            let s = &self.structures[id];
            (s.offset, s.len)
        };
        self.points.splice(old_offset..old_offset + old_len, topology.points);
        for s in self.structures.values_mut() {
            if s.offset > old_offset {
                s.offset = s.offset - old_len + new_len;
            }
        }
        let s = &mut self.structures[id];
        s.config = config;
        s.len = new_len;
        s.links = topology.links;
        self.relink()?;

        log::debug!("rebuilt structure {:?}: {} -> {} points", id, old_len, new_len);
        Ok(())
    }

    /// Rebuild only if `config` differs from the current one. Returns whether
    /// a rebuild happened.
    pub fn reconfigure(&mut self, id: StructureId, config: impl Into<StructureConfig<V>>) -> Result<bool, PhysicsError> {
        let config = config.into();
        match self.structures.get(id) {
            None => Err(PhysicsError::UnknownStructure),
            Some(s) if s.config == config => Ok(false),
            Some(_) => self.rebuild(id, config).map(|()| true),
        }
    }

    /// Destroy a structure along with every link touching it.
    pub fn remove(&mut self, id: StructureId) -> Result<(), PhysicsError> {
        let removed = self.structures.remove(id).ok_or(PhysicsError::UnknownStructure)?;
        self.points.drain(removed.offset..removed.offset + removed.len);
        for s in self.structures.values_mut() {
            if s.offset > removed.offset {
                s.offset -= removed.len;
            }
        }
        self.cross_links.retain(|&(a, b)| a != id && b != id);
        self.point_links.retain(|l| l.a.structure != id && l.b.structure != id);
        self.relink()?;

        log::debug!("removed structure {:?} ({} points)", id, removed.len);
        Ok(())
    }

    /// Link point `i` of `a` to point `i` of `b` for every `i`. Both
    /// structures must have the same number of points. The link is recorded
    /// and re-applied whenever either side is rebuilt.
    pub fn link_structures(&mut self, a: StructureId, b: StructureId) -> Result<(), PhysicsError> {
        let (sa, sb) = match (self.structures.get(a), self.structures.get(b)) {
            (Some(sa), Some(sb)) => (sa, sb),
            _ => return Err(PhysicsError::UnknownStructure),
        };
        if a == b {
            return Err(PhysicsError::SelfLink { index: sa.offset });
        }
        if sa.len != sb.len {
            return Err(PhysicsError::InvalidTopology { expected: sa.len, found: sb.len });
        }
        if self.cross_links.iter().any(|&(x, y)| (x, y) == (a, b) || (x, y) == (b, a)) {
            return Ok(());
        }

        self.cross_links.push((a, b));
        self.relink()?;
        log::debug!("cross-linked structures {:?} and {:?}", a, b);
        Ok(())
    }

    /// Link two single points, using the force config's spring parameters
    /// and their current distance as rest length. Returns `Ok(false)` if they
    /// were already linked.
    pub fn link(&mut self, a: PointRef, b: PointRef) -> Result<bool, PhysicsError> {
        let (ga, gb) = (self.global_index(a)?, self.global_index(b)?);
        if ga == gb {
            return Err(PhysicsError::SelfLink { index: ga });
        }
        if self.links.contains(ga, gb) {
            return Ok(false);
        }

        let rest_length = self.points[ga].position.distance(self.points[gb].position);
        let link = Link::new(ga, gb, rest_length, self.config.force.spring_stiffness, self.config.force.spring_damping);
        self.links.link(link)?;
        self.point_links.push(PointLink { a, b, rest_length });
        Ok(true)
    }

    /// Rebuild the global link graph from structure links, cross-links and
    /// point links.
    fn relink(&mut self) -> Result<(), PhysicsError> {
        let mut links = LinkGraph::new(self.points.len());

        for s in self.structures.values() {
            for link in s.links.iter() {
                links.link(link.offset(s.offset))?;
            }
        }

        for &(a, b) in &self.cross_links {
            let (sa, sb) = (&self.structures[a], &self.structures[b]);
            let params = sa.config.link_parameters();
            for i in 0..sa.len {
                links.link(Link::new(sa.offset + i, sb.offset + i, params.rest_length, params.stiffness, params.damping))?;
            }
        }

        let structures = &self.structures;
        self.point_links.retain(|l| {
            let valid = [l.a, l.b].iter().all(|r| structures.get(r.structure).is_some_and(|s| r.index < s.len));
            if !valid {
                log::warn!("dropping link {:?} <-> {:?}: point no longer exists", l.a, l.b);
            }
            valid
        });
        for l in &self.point_links {
            let (sa, sb) = (&self.structures[l.a.structure], &self.structures[l.b.structure]);
            links.link(Link::new(
                sa.offset + l.a.index,
                sb.offset + l.b.index,
                l.rest_length,
                self.config.force.spring_stiffness,
                self.config.force.spring_damping,
            ))?;
        }

        self.links = links;
        Ok(())
    }

    // ----------------------------------------------------------------------
    // Point access
    // ----------------------------------------------------------------------

    /// Every point of every structure.
    pub fn points(&self) -> &[Point<V>] {
        &self.points
    }

    /// Host read/write surface for positions and velocities.
    pub fn points_mut(&mut self) -> &mut [Point<V>] {
        &mut self.points
    }

    pub fn links(&self) -> &LinkGraph<V::Scalar> {
        &self.links
    }

    pub fn structure_ids(&self) -> impl Iterator<Item = StructureId> + '_ {
        self.structures.keys()
    }

    pub fn structure_config(&self, id: StructureId) -> Option<&StructureConfig<V>> {
        self.structures.get(id).map(|s| &s.config)
    }

    pub fn structure_points(&self, id: StructureId) -> Result<&[Point<V>], PhysicsError> {
        let s = self.structures.get(id).ok_or(PhysicsError::UnknownStructure)?;
        Ok(&self.points[s.offset..s.offset + s.len])
    }

    pub fn structure_points_mut(&mut self, id: StructureId) -> Result<&mut [Point<V>], PhysicsError> {
        let s = self.structures.get(id).ok_or(PhysicsError::UnknownStructure)?;
        Ok(&mut self.points[s.offset..s.offset + s.len])
    }

    /// Index of a point in [`points`](Self::points).
    pub fn global_index(&self, point: PointRef) -> Result<usize, PhysicsError> {
        let s = self.structures.get(point.structure).ok_or(PhysicsError::UnknownStructure)?;
        if point.index >= s.len {
            return Err(PhysicsError::PointOutOfBounds { index: point.index, count: s.len });
        }
        Ok(s.offset + point.index)
    }

    pub fn point(&self, point: PointRef) -> Result<&Point<V>, PhysicsError> {
        let index = self.global_index(point)?;
        Ok(&self.points[index])
    }

    pub fn point_mut(&mut self, point: PointRef) -> Result<&mut Point<V>, PhysicsError> {
        let index = self.global_index(point)?;
        Ok(&mut self.points[index])
    }

    /// Pin a point to `target`, or move the target of an already pinned point.
    /// A rebuild restores the anchors of the structure's config.
    pub fn set_anchor_target(&mut self, point: PointRef, target: V) -> Result<(), PhysicsError> {
        self.point_mut(point)?.anchor_to(target);
        Ok(())
    }

    pub fn release_anchor(&mut self, point: PointRef) -> Result<(), PhysicsError> {
        self.point_mut(point)?.release();
        Ok(())
    }

    /// Queue the force of a rigid-body contact on its point for the next force
    /// pass, and return the reaction the host should apply to the other body.
    pub fn queue_collision(&mut self, event: CollisionEvent<V>) -> Result<V, PhysicsError> {
        let factor = self.config.force.collision_damping_factor;
        let force = event.relative_velocity.scale(event.other_mass * factor);
        self.point_mut(event.point)?.queue_collision_force(force);
        Ok(-force)
    }

    // ----------------------------------------------------------------------
    // Time stepping
    // ----------------------------------------------------------------------

    /// Advance every structure by one fixed step.
    pub fn step<O: StepObserver>(&mut self, observer: &mut O) {
        let Simulation { config, points, links, integrator, .. } = self;
        let links = &*links;
        let force_config = &config.force;

        integrator.advance(
            points,
            |points: &mut [Point<V>], _h: V::Scalar| {
                force::apply_forces(points, links, force_config);
                observer.on_force_evaluation();
            },
            config.time_step,
        );
        observer.on_integrate();

        self.steps += 1;
        log::trace!("completed step {}", self.steps);
        observer.on_step_complete();
    }

    /// Feed one frame of wall-clock time and run the fixed steps it pays for.
    /// Returns the number of steps run, at most `max_catch_up`.
    pub fn tick<O: StepObserver>(&mut self, frame_time: V::Scalar, observer: &mut O) -> usize {
        let steps = self.accumulator.accumulate(frame_time);
        for _ in 0..steps {
            self.step(observer);
        }
        steps
    }

    // ----------------------------------------------------------------------
    // Diagnostics
    // ----------------------------------------------------------------------

    pub fn kinetic_energy(&self) -> V::Scalar {
        self.points.iter().fold(V::Scalar::zero(), |acc, p| acc + p.kinetic_energy())
    }

    /// Elastic energy stored in all links.
    pub fn potential_energy(&self) -> V::Scalar {
        self.links
            .iter()
            .fold(V::Scalar::zero(), |acc, l| acc + force::spring_potential_energy(&self.points, l))
    }

    /// `-m g . p` summed over free points.
    pub fn gravitational_energy(&self) -> V::Scalar {
        let g = self.config.force.gravity;
        self.points
            .iter()
            .filter(|p| !p.is_anchored())
            .fold(V::Scalar::zero(), |acc, p| acc - p.mass() * g.dot(p.position))
    }

    pub fn total_energy(&self) -> V::Scalar {
        self.kinetic_energy() + self.potential_energy() + self.gravitational_energy()
    }
}
