use std::fmt;

use super::{Bus, Cpu};

/// One machine cycle of an instruction. Returns `true` once the instruction
/// has completed.
pub type StepFn = fn(&mut Cpu, &mut dyn Bus) -> bool;

/// Entry of the primary opcode table.
#[derive(Clone, Copy)]
pub struct Instruction {
    /// Diagnostic only.
    pub mnemonic: &'static str,
    pub step: StepFn,
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instruction")
            .field("mnemonic", &self.mnemonic)
            .finish_non_exhaustive()
    }
}

/// Handler for a primary opcode, or `None` for the eleven holes in the DMG
/// opcode map (0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC,
/// 0xFD). 0xCB maps to the prefix handler, which decodes the secondary table.
#[inline]
pub fn instruction(opcode: u8) -> Option<&'static Instruction> {
    INSTRUCTIONS[opcode as usize].as_ref()
}

static INSTRUCTIONS: [Option<Instruction>; 256] = build_table();

const fn op(mnemonic: &'static str, step: StepFn) -> Option<Instruction> {
    Some(Instruction { mnemonic, step })
}

const fn build_table() -> [Option<Instruction>; 256] {
    let mut t: [Option<Instruction>; 256] = [None; 256];
    t[0x00] = op("NOP", Cpu::nop);
    t[0x01] = op("LD BC,n16", Cpu::ld_rr_n16);
    t[0x02] = op("LD (BC),A", Cpu::ld_ind_a);
    t[0x03] = op("INC BC", Cpu::inc_rr);
    t[0x04] = op("INC B", Cpu::inc_r);
    t[0x05] = op("DEC B", Cpu::dec_r);
    t[0x06] = op("LD B,n8", Cpu::ld_r_n8);
    t[0x07] = op("RLCA", Cpu::rotate_a);
    t[0x08] = op("LD (a16),SP", Cpu::ld_a16_sp);
    t[0x09] = op("ADD HL,BC", Cpu::add_hl_rr);
    t[0x0A] = op("LD A,(BC)", Cpu::ld_a_ind);
    t[0x0B] = op("DEC BC", Cpu::dec_rr);
    t[0x0C] = op("INC C", Cpu::inc_r);
    t[0x0D] = op("DEC C", Cpu::dec_r);
    t[0x0E] = op("LD C,n8", Cpu::ld_r_n8);
    t[0x0F] = op("RRCA", Cpu::rotate_a);
    t[0x10] = op("STOP", Cpu::stop);
    t[0x11] = op("LD DE,n16", Cpu::ld_rr_n16);
    t[0x12] = op("LD (DE),A", Cpu::ld_ind_a);
    t[0x13] = op("INC DE", Cpu::inc_rr);
    t[0x14] = op("INC D", Cpu::inc_r);
    t[0x15] = op("DEC D", Cpu::dec_r);
    t[0x16] = op("LD D,n8", Cpu::ld_r_n8);
    t[0x17] = op("RLA", Cpu::rotate_a);
    t[0x18] = op("JR e8", Cpu::jr_e8);
    t[0x19] = op("ADD HL,DE", Cpu::add_hl_rr);
    t[0x1A] = op("LD A,(DE)", Cpu::ld_a_ind);
    t[0x1B] = op("DEC DE", Cpu::dec_rr);
    t[0x1C] = op("INC E", Cpu::inc_r);
    t[0x1D] = op("DEC E", Cpu::dec_r);
    t[0x1E] = op("LD E,n8", Cpu::ld_r_n8);
    t[0x1F] = op("RRA", Cpu::rotate_a);
    t[0x20] = op("JR NZ,e8", Cpu::jr_cc);
    t[0x21] = op("LD HL,n16", Cpu::ld_rr_n16);
    t[0x22] = op("LD (HL+),A", Cpu::ld_ind_a);
    t[0x23] = op("INC HL", Cpu::inc_rr);
    t[0x24] = op("INC H", Cpu::inc_r);
    t[0x25] = op("DEC H", Cpu::dec_r);
    t[0x26] = op("LD H,n8", Cpu::ld_r_n8);
    t[0x27] = op("DAA", Cpu::daa);
    t[0x28] = op("JR Z,e8", Cpu::jr_cc);
    t[0x29] = op("ADD HL,HL", Cpu::add_hl_rr);
    t[0x2A] = op("LD A,(HL+)", Cpu::ld_a_ind);
    t[0x2B] = op("DEC HL", Cpu::dec_rr);
    t[0x2C] = op("INC L", Cpu::inc_r);
    t[0x2D] = op("DEC L", Cpu::dec_r);
    t[0x2E] = op("LD L,n8", Cpu::ld_r_n8);
    t[0x2F] = op("CPL", Cpu::cpl);
    t[0x30] = op("JR NC,e8", Cpu::jr_cc);
    t[0x31] = op("LD SP,n16", Cpu::ld_rr_n16);
    t[0x32] = op("LD (HL-),A", Cpu::ld_ind_a);
    t[0x33] = op("INC SP", Cpu::inc_rr);
    t[0x34] = op("INC (HL)", Cpu::inc_hl_ind);
    t[0x35] = op("DEC (HL)", Cpu::dec_hl_ind);
    t[0x36] = op("LD (HL),n8", Cpu::ld_hl_n8);
    t[0x37] = op("SCF", Cpu::scf);
    t[0x38] = op("JR C,e8", Cpu::jr_cc);
    t[0x39] = op("ADD HL,SP", Cpu::add_hl_rr);
    t[0x3A] = op("LD A,(HL-)", Cpu::ld_a_ind);
    t[0x3B] = op("DEC SP", Cpu::dec_rr);
    t[0x3C] = op("INC A", Cpu::inc_r);
    t[0x3D] = op("DEC A", Cpu::dec_r);
    t[0x3E] = op("LD A,n8", Cpu::ld_r_n8);
    t[0x3F] = op("CCF", Cpu::ccf);
    t[0x40] = op("LD B,B", Cpu::ld_r_r);
    t[0x41] = op("LD B,C", Cpu::ld_r_r);
    t[0x42] = op("LD B,D", Cpu::ld_r_r);
    t[0x43] = op("LD B,E", Cpu::ld_r_r);
    t[0x44] = op("LD B,H", Cpu::ld_r_r);
    t[0x45] = op("LD B,L", Cpu::ld_r_r);
    t[0x46] = op("LD B,(HL)", Cpu::ld_r_hl);
    t[0x47] = op("LD B,A", Cpu::ld_r_r);
    t[0x48] = op("LD C,B", Cpu::ld_r_r);
    t[0x49] = op("LD C,C", Cpu::ld_r_r);
    t[0x4A] = op("LD C,D", Cpu::ld_r_r);
    t[0x4B] = op("LD C,E", Cpu::ld_r_r);
    t[0x4C] = op("LD C,H", Cpu::ld_r_r);
    t[0x4D] = op("LD C,L", Cpu::ld_r_r);
    t[0x4E] = op("LD C,(HL)", Cpu::ld_r_hl);
    t[0x4F] = op("LD C,A", Cpu::ld_r_r);
    t[0x50] = op("LD D,B", Cpu::ld_r_r);
    t[0x51] = op("LD D,C", Cpu::ld_r_r);
    t[0x52] = op("LD D,D", Cpu::ld_r_r);
    t[0x53] = op("LD D,E", Cpu::ld_r_r);
    t[0x54] = op("LD D,H", Cpu::ld_r_r);
    t[0x55] = op("LD D,L", Cpu::ld_r_r);
    t[0x56] = op("LD D,(HL)", Cpu::ld_r_hl);
    t[0x57] = op("LD D,A", Cpu::ld_r_r);
    t[0x58] = op("LD E,B", Cpu::ld_r_r);
    t[0x59] = op("LD E,C", Cpu::ld_r_r);
    t[0x5A] = op("LD E,D", Cpu::ld_r_r);
    t[0x5B] = op("LD E,E", Cpu::ld_r_r);
    t[0x5C] = op("LD E,H", Cpu::ld_r_r);
    t[0x5D] = op("LD E,L", Cpu::ld_r_r);
    t[0x5E] = op("LD E,(HL)", Cpu::ld_r_hl);
    t[0x5F] = op("LD E,A", Cpu::ld_r_r);
    t[0x60] = op("LD H,B", Cpu::ld_r_r);
    t[0x61] = op("LD H,C", Cpu::ld_r_r);
    t[0x62] = op("LD H,D", Cpu::ld_r_r);
    t[0x63] = op("LD H,E", Cpu::ld_r_r);
    t[0x64] = op("LD H,H", Cpu::ld_r_r);
    t[0x65] = op("LD H,L", Cpu::ld_r_r);
    t[0x66] = op("LD H,(HL)", Cpu::ld_r_hl);
    t[0x67] = op("LD H,A", Cpu::ld_r_r);
    t[0x68] = op("LD L,B", Cpu::ld_r_r);
    t[0x69] = op("LD L,C", Cpu::ld_r_r);
    t[0x6A] = op("LD L,D", Cpu::ld_r_r);
    t[0x6B] = op("LD L,E", Cpu::ld_r_r);
    t[0x6C] = op("LD L,H", Cpu::ld_r_r);
    t[0x6D] = op("LD L,L", Cpu::ld_r_r);
    t[0x6E] = op("LD L,(HL)", Cpu::ld_r_hl);
    t[0x6F] = op("LD L,A", Cpu::ld_r_r);
    t[0x70] = op("LD (HL),B", Cpu::ld_hl_r);
    t[0x71] = op("LD (HL),C", Cpu::ld_hl_r);
    t[0x72] = op("LD (HL),D", Cpu::ld_hl_r);
    t[0x73] = op("LD (HL),E", Cpu::ld_hl_r);
    t[0x74] = op("LD (HL),H", Cpu::ld_hl_r);
    t[0x75] = op("LD (HL),L", Cpu::ld_hl_r);
    t[0x76] = op("HALT", Cpu::halt);
    t[0x77] = op("LD (HL),A", Cpu::ld_hl_r);
    t[0x78] = op("LD A,B", Cpu::ld_r_r);
    t[0x79] = op("LD A,C", Cpu::ld_r_r);
    t[0x7A] = op("LD A,D", Cpu::ld_r_r);
    t[0x7B] = op("LD A,E", Cpu::ld_r_r);
    t[0x7C] = op("LD A,H", Cpu::ld_r_r);
    t[0x7D] = op("LD A,L", Cpu::ld_r_r);
    t[0x7E] = op("LD A,(HL)", Cpu::ld_r_hl);
    t[0x7F] = op("LD A,A", Cpu::ld_r_r);
    t[0x80] = op("ADD A,B", Cpu::alu_a_r);
    t[0x81] = op("ADD A,C", Cpu::alu_a_r);
    t[0x82] = op("ADD A,D", Cpu::alu_a_r);
    t[0x83] = op("ADD A,E", Cpu::alu_a_r);
    t[0x84] = op("ADD A,H", Cpu::alu_a_r);
    t[0x85] = op("ADD A,L", Cpu::alu_a_r);
    t[0x86] = op("ADD A,(HL)", Cpu::alu_a_hl);
    t[0x87] = op("ADD A,A", Cpu::alu_a_r);
    t[0x88] = op("ADC A,B", Cpu::alu_a_r);
    t[0x89] = op("ADC A,C", Cpu::alu_a_r);
    t[0x8A] = op("ADC A,D", Cpu::alu_a_r);
    t[0x8B] = op("ADC A,E", Cpu::alu_a_r);
    t[0x8C] = op("ADC A,H", Cpu::alu_a_r);
    t[0x8D] = op("ADC A,L", Cpu::alu_a_r);
    t[0x8E] = op("ADC A,(HL)", Cpu::alu_a_hl);
    t[0x8F] = op("ADC A,A", Cpu::alu_a_r);
    t[0x90] = op("SUB A,B", Cpu::alu_a_r);
    t[0x91] = op("SUB A,C", Cpu::alu_a_r);
    t[0x92] = op("SUB A,D", Cpu::alu_a_r);
    t[0x93] = op("SUB A,E", Cpu::alu_a_r);
    t[0x94] = op("SUB A,H", Cpu::alu_a_r);
    t[0x95] = op("SUB A,L", Cpu::alu_a_r);
    t[0x96] = op("SUB A,(HL)", Cpu::alu_a_hl);
    t[0x97] = op("SUB A,A", Cpu::alu_a_r);
    t[0x98] = op("SBC A,B", Cpu::alu_a_r);
    t[0x99] = op("SBC A,C", Cpu::alu_a_r);
    t[0x9A] = op("SBC A,D", Cpu::alu_a_r);
    t[0x9B] = op("SBC A,E", Cpu::alu_a_r);
    t[0x9C] = op("SBC A,H", Cpu::alu_a_r);
    t[0x9D] = op("SBC A,L", Cpu::alu_a_r);
    t[0x9E] = op("SBC A,(HL)", Cpu::alu_a_hl);
    t[0x9F] = op("SBC A,A", Cpu::alu_a_r);
    t[0xA0] = op("AND A,B", Cpu::alu_a_r);
    t[0xA1] = op("AND A,C", Cpu::alu_a_r);
    t[0xA2] = op("AND A,D", Cpu::alu_a_r);
    t[0xA3] = op("AND A,E", Cpu::alu_a_r);
    t[0xA4] = op("AND A,H", Cpu::alu_a_r);
    t[0xA5] = op("AND A,L", Cpu::alu_a_r);
    t[0xA6] = op("AND A,(HL)", Cpu::alu_a_hl);
    t[0xA7] = op("AND A,A", Cpu::alu_a_r);
    t[0xA8] = op("XOR A,B", Cpu::alu_a_r);
    t[0xA9] = op("XOR A,C", Cpu::alu_a_r);
    t[0xAA] = op("XOR A,D", Cpu::alu_a_r);
    t[0xAB] = op("XOR A,E", Cpu::alu_a_r);
    t[0xAC] = op("XOR A,H", Cpu::alu_a_r);
    t[0xAD] = op("XOR A,L", Cpu::alu_a_r);
    t[0xAE] = op("XOR A,(HL)", Cpu::alu_a_hl);
    t[0xAF] = op("XOR A,A", Cpu::alu_a_r);
    t[0xB0] = op("OR A,B", Cpu::alu_a_r);
    t[0xB1] = op("OR A,C", Cpu::alu_a_r);
    t[0xB2] = op("OR A,D", Cpu::alu_a_r);
    t[0xB3] = op("OR A,E", Cpu::alu_a_r);
    t[0xB4] = op("OR A,H", Cpu::alu_a_r);
    t[0xB5] = op("OR A,L", Cpu::alu_a_r);
    t[0xB6] = op("OR A,(HL)", Cpu::alu_a_hl);
    t[0xB7] = op("OR A,A", Cpu::alu_a_r);
    t[0xB8] = op("CP A,B", Cpu::alu_a_r);
    t[0xB9] = op("CP A,C", Cpu::alu_a_r);
    t[0xBA] = op("CP A,D", Cpu::alu_a_r);
    t[0xBB] = op("CP A,E", Cpu::alu_a_r);
    t[0xBC] = op("CP A,H", Cpu::alu_a_r);
    t[0xBD] = op("CP A,L", Cpu::alu_a_r);
    t[0xBE] = op("CP A,(HL)", Cpu::alu_a_hl);
    t[0xBF] = op("CP A,A", Cpu::alu_a_r);
    t[0xC0] = op("RET NZ", Cpu::ret_cc);
    t[0xC1] = op("POP BC", Cpu::pop_rr);
    t[0xC2] = op("JP NZ,a16", Cpu::jp_cc);
    t[0xC3] = op("JP a16", Cpu::jp_a16);
    t[0xC4] = op("CALL NZ,a16", Cpu::call_cc);
    t[0xC5] = op("PUSH BC", Cpu::push_rr);
    t[0xC6] = op("ADD A,n8", Cpu::alu_a_n8);
    t[0xC7] = op("RST $00", Cpu::rst);
    t[0xC8] = op("RET Z", Cpu::ret_cc);
    t[0xC9] = op("RET", Cpu::ret);
    t[0xCA] = op("JP Z,a16", Cpu::jp_cc);
    t[0xCB] = op("PREFIX CB", Cpu::prefix_cb);
    t[0xCC] = op("CALL Z,a16", Cpu::call_cc);
    t[0xCD] = op("CALL a16", Cpu::call_a16);
    t[0xCE] = op("ADC A,n8", Cpu::alu_a_n8);
    t[0xCF] = op("RST $08", Cpu::rst);
    t[0xD0] = op("RET NC", Cpu::ret_cc);
    t[0xD1] = op("POP DE", Cpu::pop_rr);
    t[0xD2] = op("JP NC,a16", Cpu::jp_cc);
    t[0xD4] = op("CALL NC,a16", Cpu::call_cc);
    t[0xD5] = op("PUSH DE", Cpu::push_rr);
    t[0xD6] = op("SUB A,n8", Cpu::alu_a_n8);
    t[0xD7] = op("RST $10", Cpu::rst);
    t[0xD8] = op("RET C", Cpu::ret_cc);
    t[0xD9] = op("RETI", Cpu::reti);
    t[0xDA] = op("JP C,a16", Cpu::jp_cc);
    t[0xDC] = op("CALL C,a16", Cpu::call_cc);
    t[0xDE] = op("SBC A,n8", Cpu::alu_a_n8);
    t[0xDF] = op("RST $18", Cpu::rst);
    t[0xE0] = op("LDH (a8),A", Cpu::ldh_a8_a);
    t[0xE1] = op("POP HL", Cpu::pop_rr);
    t[0xE2] = op("LDH (C),A", Cpu::ldh_c_a);
    t[0xE5] = op("PUSH HL", Cpu::push_rr);
    t[0xE6] = op("AND A,n8", Cpu::alu_a_n8);
    t[0xE7] = op("RST $20", Cpu::rst);
    t[0xE8] = op("ADD SP,e8", Cpu::add_sp_e8);
    t[0xE9] = op("JP HL", Cpu::jp_hl);
    t[0xEA] = op("LD (a16),A", Cpu::ld_a16_a);
    t[0xEE] = op("XOR A,n8", Cpu::alu_a_n8);
    t[0xEF] = op("RST $28", Cpu::rst);
    t[0xF0] = op("LDH A,(a8)", Cpu::ldh_a_a8);
    t[0xF1] = op("POP AF", Cpu::pop_rr);
    t[0xF2] = op("LDH A,(C)", Cpu::ldh_a_c);
    t[0xF3] = op("DI", Cpu::di);
    t[0xF5] = op("PUSH AF", Cpu::push_rr);
    t[0xF6] = op("OR A,n8", Cpu::alu_a_n8);
    t[0xF7] = op("RST $30", Cpu::rst);
    t[0xF8] = op("LD HL,SP+e8", Cpu::ld_hl_sp_e8);
    t[0xF9] = op("LD SP,HL", Cpu::ld_sp_hl);
    t[0xFA] = op("LD A,(a16)", Cpu::ld_a_a16);
    t[0xFB] = op("EI", Cpu::ei);
    t[0xFE] = op("CP A,n8", Cpu::alu_a_n8);
    t[0xFF] = op("RST $38", Cpu::rst);
    t
}
