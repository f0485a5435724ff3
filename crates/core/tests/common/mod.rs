use serde_json::{json, Value};

/// A registration payload as the dashboard form submits it, every tab filled.
pub fn full_registration() -> Value {
    json!({
        "firstName": "Juan Pablo",
        "lastName": "Soto Muñoz",
        "email": "jp.soto@colegio.cl",
        "rut": "11.111.111-1",
        "role": "User",
        "permisos": ["READ", "UPDATE"],
        "staffType": "Docente",
        "subjectsTeaching": ["Matemáticas", "Educación Física"],
        "position": "Profesor jefe",
        "department": "Matemáticas",
        "especialidad": "Álgebra",
        "registroSecreduc": "RS-2231",
        "mencionesExtra": ["Convivencia escolar"],
        "phoneNumber": "+56912345678",
        "birthDate": "1985-03-02T03:00:00.000Z",
        "address": "Av. Siempre Viva 742",
        "comuna": "Ñuñoa",
        "region": "Metropolitana",
        "emergencyContact": {
            "name": "Carla Soto",
            "relation": "Hermana",
            "phone": "987654321"
        },
        "tipoContrato": "Planta",
        "horasContrato": 44,
        "fechaIngreso": "2015-03-01",
        "bieniosReconocidos": 5,
        "evaluacionDocente": "Competente",
        "isActive": true,
        "configuracionNotificaciones": { "email": true, "sms": false },
        "password": "Clave$egura9",
        "confirmPassword": "Clave$egura9"
    })
}

/// A registration payload with only the mandatory fields, optional inputs
/// left as the form's untouched defaults.
pub fn minimal_registration() -> Value {
    json!({
        "firstName": "Ana",
        "lastName": "Rojas",
        "email": "ana.rojas@colegio.cl",
        "rut": "8765432-k",
        "role": "Viewer",
        "permisos": [],
        "staffType": "",
        "subjectsTeaching": [],
        "position": "",
        "department": "",
        "phoneNumber": "",
        "birthDate": null,
        "emergencyContact": { "name": "", "relation": "", "phone": "" },
        "tipoContrato": "",
        "horasContrato": null,
        "password": "Clave$egura9",
        "confirmPassword": "Clave$egura9"
    })
}
