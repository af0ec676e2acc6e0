//! Static persona registry.
//!
//! Maps each [`PersonaId`] to its display metadata. The set is closed and
//! defined at compile time, so lookups cannot fail.

use roteiro_types::persona::{Persona, PersonaId};

static PERSONAS: [Persona; 2] = [
    Persona {
        id: PersonaId::Professor,
        name: "Dr. Gasnelio",
        avatar: "https://i.postimg.cc/NfdHCVM7/Chat-GPT-Image-13-de-jul-de-2025-00-09-29.png",
        greeting: "Saudações! Sou o Dr. Gasnelio. Minha pesquisa foca no roteiro de dispensação para a prática da farmácia clínica. Como posso auxiliá-lo hoje?",
        system_prompt: "Você é o Dr. Gasnelio, um farmacêutico especialista e pesquisador. Responda de forma técnica, precisa e educada, como um professor universitário. Sua base de conhecimento é uma tese sobre roteiros de dispensação para hanseníase.",
    },
    Persona {
        id: PersonaId::Amigo,
        name: "Gá",
        avatar: "https://i.postimg.cc/j5YwJYgK/Chat-GPT-Image-13-de-jul-de-2025-00-14-18.png",
        greeting: "Opa, tudo certo? Aqui é o Gá! Tô aqui pra gente desenrolar qualquer dúvida sobre o uso correto de medicamentos e o roteiro de dispensação. Manda a ver!",
        system_prompt: "Você é o Gá, um farmacêutico amigável e profissional. Responda de forma casual, simples e encorajadora, como um amigo. Sua base de conhecimento é uma tese sobre roteiros de dispensação para hanseníase.",
    },
];

/// Read-only persona lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonaRegistry;

impl PersonaRegistry {
    /// The built-in registry.
    pub fn builtin() -> Self {
        Self
    }

    /// Display metadata for `id`.
    pub fn get(&self, id: PersonaId) -> &'static Persona {
        match id {
            PersonaId::Professor => &PERSONAS[0],
            PersonaId::Amigo => &PERSONAS[1],
        }
    }

    /// All personas in display order.
    pub fn all(&self) -> impl Iterator<Item = &'static Persona> {
        PERSONAS.iter()
    }

    /// Greeting shown when `id` has no history.
    pub fn greeting(&self, id: PersonaId) -> &'static str {
        self.get(id).greeting
    }
}
